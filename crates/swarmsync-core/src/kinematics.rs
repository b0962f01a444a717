//! Closed-form motion helpers: ballistic flight, damped 3D integration,
//! strike trajectories and fish-school steering forces.

use crate::constants::{ALIGNMENT_WEIGHT, COHESION_WEIGHT, SEPARATION_WEIGHT, TRAJECTORY_SAMPLES};

/// 2D ballistic position after `t` seconds. Exponential drag scales both
/// components before the independent vertical gravity term is added.
pub fn projectile_position(
    v0: f64,
    angle_rad: f64,
    t: f64,
    gravity: f64,
    wind_resistance: f64,
) -> [f64; 2] {
    let drag = (-wind_resistance * t).exp();
    let x = v0 * angle_rad.cos() * t * drag;
    let y = v0 * angle_rad.sin() * t * drag - 0.5 * gravity * t * t;
    [x, y]
}

/// Semi-implicit Euler step under viscous damping. The velocity is
/// accelerated, then damped by `0.95 - 0.1 * fluid_density`, and the
/// already-damped velocity advances the position.
pub fn integrate_3d(
    position: [f64; 3],
    velocity: [f64; 3],
    acceleration: [f64; 3],
    dt: f64,
    fluid_density: f64,
) -> ([f64; 3], [f64; 3]) {
    let resistance = 0.95 - 0.1 * fluid_density;
    let mut new_velocity = [0.0f64; 3];
    let mut new_position = [0.0f64; 3];
    for axis in 0..3 {
        new_velocity[axis] = (velocity[axis] + acceleration[axis] * dt) * resistance;
        new_position[axis] = position[axis] + new_velocity[axis] * dt;
    }
    (new_position, new_velocity)
}

/// One point on a sampled strike path, tagged with its elapsed time.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectorySample {
    pub position: [f64; 3],
    pub t: f64,
}

/// Straight-line strike path from `start` to `target` at constant
/// `strike_velocity`, sampled at `TRAJECTORY_SAMPLES + 1` points. Display
/// diagnostic; never fed back into the tick loop.
pub fn strike_trajectory(
    start: [f64; 3],
    target: [f64; 3],
    strike_velocity: f64,
) -> (Vec<TrajectorySample>, f64) {
    let dx = target[0] - start[0];
    let dy = target[1] - start[1];
    let dz = target[2] - start[2];
    let distance = (dx * dx + dy * dy + dz * dz).sqrt();
    let strike_time = distance / strike_velocity;

    let mut samples = Vec::with_capacity(TRAJECTORY_SAMPLES + 1);
    for i in 0..=TRAJECTORY_SAMPLES {
        let progress = i as f64 / TRAJECTORY_SAMPLES as f64;
        samples.push(TrajectorySample {
            position: [
                start[0] + dx * progress,
                start[1] + dy * progress,
                start[2] + dz * progress,
            ],
            t: progress * strike_time,
        });
    }
    (samples, strike_time)
}

/// Previous-tick position and velocity of one schooling neighbor.
#[derive(Clone, Copy, Debug)]
pub struct SchoolingNeighbor {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

/// Combined separation/alignment/cohesion steering force.
///
/// Each term accumulates only over neighbors inside its own radius and is
/// averaged over its own matching count; a term with no matching neighbors
/// contributes nothing. The separation term additionally skips coincident
/// neighbors.
pub fn schooling_force(
    position: [f64; 3],
    velocity: [f64; 3],
    neighbors: &[SchoolingNeighbor],
    separation_radius: f64,
    alignment_radius: f64,
    cohesion_radius: f64,
) -> [f64; 3] {
    let mut separation = [0.0f64; 3];
    let mut alignment = [0.0f64; 3];
    let mut cohesion = [0.0f64; 3];
    let mut sep_count = 0usize;
    let mut align_count = 0usize;
    let mut coh_count = 0usize;

    for neighbor in neighbors {
        let dx = neighbor.position[0] - position[0];
        let dy = neighbor.position[1] - position[1];
        let dz = neighbor.position[2] - position[2];
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();

        if distance < separation_radius && distance > 0.0 {
            separation[0] -= dx / distance;
            separation[1] -= dy / distance;
            separation[2] -= dz / distance;
            sep_count += 1;
        }

        if distance < alignment_radius {
            for axis in 0..3 {
                alignment[axis] += neighbor.velocity[axis];
            }
            align_count += 1;
        }

        if distance < cohesion_radius {
            for axis in 0..3 {
                cohesion[axis] += neighbor.position[axis];
            }
            coh_count += 1;
        }
    }

    if sep_count > 0 {
        for axis in 0..3 {
            separation[axis] /= sep_count as f64;
        }
    }
    if align_count > 0 {
        for axis in 0..3 {
            alignment[axis] = alignment[axis] / align_count as f64 - velocity[axis];
        }
    }
    if coh_count > 0 {
        for axis in 0..3 {
            cohesion[axis] = cohesion[axis] / coh_count as f64 - position[axis];
        }
    }

    let mut force = [0.0f64; 3];
    for axis in 0..3 {
        force[axis] = separation[axis] * SEPARATION_WEIGHT
            + alignment[axis] * ALIGNMENT_WEIGHT
            + cohesion[axis] * COHESION_WEIGHT;
    }
    force
}
