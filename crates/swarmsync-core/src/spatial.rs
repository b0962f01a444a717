use crate::drone::Drone;
use rstar::{RTree, RTreeObject, AABB};

/// Lightweight position-only entry for the per-tick index, avoids cloning
/// full drones into the tree.
#[derive(Clone, Debug)]
pub struct DroneLocation {
    pub id: u32,
    pub position: [f64; 3],
}

impl RTreeObject for DroneLocation {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Build an R*-tree from drone positions via bulk_load (O(n log n)).
pub fn build_index(drones: &[Drone]) -> RTree<DroneLocation> {
    let locations: Vec<DroneLocation> = drones
        .iter()
        .map(|d| DroneLocation {
            id: d.id,
            position: d.position,
        })
        .collect();
    RTree::bulk_load(locations)
}

/// IDs of drones strictly within `radius` of `center`, excluding `self_id`,
/// sorted ascending. Ascending id order equals creation order; the status
/// classification's "first neighbor" rule depends on it.
pub fn neighbors_within(
    tree: &RTree<DroneLocation>,
    center: [f64; 3],
    radius: f64,
    self_id: u32,
) -> Vec<u32> {
    let envelope = AABB::from_corners(
        [center[0] - radius, center[1] - radius, center[2] - radius],
        [center[0] + radius, center[1] + radius, center[2] + radius],
    );
    let r_sq = radius * radius;
    let mut ids = Vec::new();
    for loc in tree.locate_in_envelope(&envelope) {
        if loc.id == self_id {
            continue;
        }
        let dx = loc.position[0] - center[0];
        let dy = loc.position[1] - center[1];
        let dz = loc.position[2] - center[2];
        if dx * dx + dy * dy + dz * dz < r_sq {
            ids.push(loc.id);
        }
    }
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drone::DroneStatus;

    fn make_drone(id: u32, x: f64, y: f64, z: f64) -> Drone {
        Drone {
            id,
            position: [x, y, z],
            velocity: [0.0; 3],
            phase: 0.0,
            energy: 100.0,
            status: DroneStatus::Active,
            last_sync_step: 0,
            strike_time: 0.3,
            air_time: 0.4,
        }
    }

    #[test]
    fn query_finds_drones_within_radius() {
        let drones = vec![
            make_drone(0, 0.0, 0.0, 0.0),
            make_drone(1, 1.0, 0.0, 0.0),
            make_drone(2, 50.0, 50.0, 50.0),
        ];
        let tree = build_index(&drones);
        assert_eq!(
            neighbors_within(&tree, [0.0, 0.0, 0.0], 2.0, u32::MAX),
            vec![0, 1]
        );
    }

    #[test]
    fn query_excludes_self() {
        let drones = vec![make_drone(0, 0.0, 0.0, 0.0), make_drone(1, 1.0, 0.0, 0.0)];
        let tree = build_index(&drones);
        assert_eq!(neighbors_within(&tree, [0.0, 0.0, 0.0], 2.0, 0), vec![1]);
    }

    #[test]
    fn query_radius_is_strict() {
        let drones = vec![make_drone(0, 0.0, 0.0, 0.0), make_drone(1, 3.0, 0.0, 0.0)];
        let tree = build_index(&drones);
        assert!(neighbors_within(&tree, [0.0, 0.0, 0.0], 3.0, 0).is_empty());
        assert_eq!(neighbors_within(&tree, [0.0, 0.0, 0.0], 3.1, 0), vec![1]);
    }

    #[test]
    fn query_uses_euclidean_distance_not_envelope() {
        // Inside the cubic envelope but outside the sphere.
        let drones = vec![make_drone(0, 4.0, 4.0, 4.0)];
        let tree = build_index(&drones);
        assert!(neighbors_within(&tree, [0.0, 0.0, 0.0], 5.0, u32::MAX).is_empty());
    }

    #[test]
    fn query_returns_sorted_ids() {
        let drones = vec![
            make_drone(7, 1.0, 0.0, 0.0),
            make_drone(2, 0.5, 0.0, 0.0),
            make_drone(10, 0.2, 0.0, 0.0),
        ];
        let tree = build_index(&drones);
        assert_eq!(
            neighbors_within(&tree, [0.0, 0.0, 0.0], 2.0, u32::MAX),
            vec![2, 7, 10]
        );
    }
}
