//! Timing-aware Kuramoto coupling and formation control.

use crate::constants::{FORMATION_FORCE_GAIN, TIMING_PHASE_PENALTY};
use std::f64::consts::TAU;
use tracing::warn;

/// Advance one drone's oscillator phase toward the mean field of its
/// neighbors' phases, then wrap into [0, 1).
///
/// With no neighbors there is no coupling and the phase is returned
/// unchanged. A drone whose committed strike + flight latency exceeds the
/// sync period cannot stay tightly coupled; it is delayed by a fixed phase
/// penalty and the violation is reported as a warning diagnostic.
pub fn next_phase(
    current_phase: f64,
    neighbor_phases: &[f64],
    strike_time: f64,
    air_time: f64,
    total_sync_period: f64,
    coupling_strength: f64,
) -> f64 {
    if neighbor_phases.is_empty() {
        return current_phase;
    }

    let mut mean_re = 0.0;
    let mut mean_im = 0.0;
    for &phase in neighbor_phases {
        let (im, re) = (TAU * phase).sin_cos();
        mean_re += re;
        mean_im += im;
    }
    let count = neighbor_phases.len() as f64;
    mean_re /= count;
    mean_im /= count;

    // Signed angular difference to the mean field via the complex cross
    // term, scaled back into phase units.
    let (own_im, own_re) = (TAU * current_phase).sin_cos();
    let cross_re = mean_re * own_re + mean_im * own_im;
    let cross_im = mean_im * own_re - mean_re * own_im;
    let phase_diff = cross_im.atan2(cross_re) / TAU;

    let mut next = (current_phase + coupling_strength * phase_diff).rem_euclid(1.0);

    if strike_time + air_time > total_sync_period {
        warn!(
            strike_time,
            air_time, total_sync_period, "timing constraint violated, delaying phase"
        );
        next = (next - TIMING_PHASE_PENALTY).rem_euclid(1.0);
    }

    next
}

/// Kuramoto order parameter R in [0, 1]: the magnitude of the mean unit
/// vector over all phases. 1 means full synchrony, 0 no net coherence.
/// An empty set scores 0.
pub fn sync_score(phases: &[f64]) -> f64 {
    if phases.is_empty() {
        return 0.0;
    }
    let mut sum_re = 0.0;
    let mut sum_im = 0.0;
    for &phase in phases {
        let (im, re) = (TAU * phase).sin_cos();
        sum_re += re;
        sum_im += im;
    }
    (sum_re * sum_re + sum_im * sum_im).sqrt() / phases.len() as f64
}

/// Pairwise formation-control force: each neighbor pulls or pushes along
/// the connecting line in proportion to its offset from `desired_distance`.
/// Coincident neighbors contribute nothing. Contributions are summed, not
/// averaged.
pub fn formation_force(
    position: [f64; 3],
    neighbor_positions: &[[f64; 3]],
    desired_distance: f64,
) -> [f64; 3] {
    let mut force = [0.0f64; 3];
    for neighbor in neighbor_positions {
        let dx = neighbor[0] - position[0];
        let dy = neighbor[1] - position[1];
        let dz = neighbor[2] - position[2];
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();
        if distance > 0.0 {
            let magnitude = (desired_distance - distance) * FORMATION_FORCE_GAIN;
            force[0] += dx / distance * magnitude;
            force[1] += dy / distance * magnitude;
            force[2] += dz / distance * magnitude;
        }
    }
    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DESIRED_FORMATION_DISTANCE;

    const NO_VIOLATION: (f64, f64, f64) = (0.3, 0.4, 1.0);

    #[test]
    fn sync_score_is_one_for_identical_phases() {
        let phases = vec![0.37; 8];
        assert!((sync_score(&phases) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sync_score_is_near_zero_for_uniform_spread() {
        for n in [2usize, 4, 8, 16] {
            let phases: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
            assert!(
                sync_score(&phases) < 1e-9,
                "uniform {n}-spread should cancel"
            );
        }
    }

    #[test]
    fn sync_score_is_zero_for_empty_input() {
        assert_eq!(sync_score(&[]), 0.0);
    }

    #[test]
    fn sync_score_stays_in_unit_interval() {
        let phases = vec![0.1, 0.15, 0.6, 0.9, 0.93];
        let r = sync_score(&phases);
        assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn next_phase_is_identity_without_neighbors() {
        let (strike, air, period) = NO_VIOLATION;
        for current in [-3.7, 0.0, 0.42, 7.3] {
            assert_eq!(next_phase(current, &[], strike, air, period, 0.7), current);
        }
    }

    #[test]
    fn next_phase_moves_toward_neighbor_mean() {
        let (strike, air, period) = NO_VIOLATION;
        let next = next_phase(0.0, &[0.25], strike, air, period, 0.5);
        assert!((next - 0.125).abs() < 1e-12);
    }

    #[test]
    fn next_phase_wraps_into_unit_interval() {
        let (strike, air, period) = NO_VIOLATION;
        for current in [-5.3, -0.001, 1.0, 12.9] {
            let next = next_phase(current, &[0.5, 0.6], strike, air, period, 0.7);
            assert!(
                (0.0..1.0).contains(&next),
                "phase {next} from input {current} escaped [0,1)"
            );
        }
    }

    #[test]
    fn timing_violation_applies_wrapped_penalty() {
        // strike + air = 1.2 > period 1.0
        let clean = next_phase(0.42, &[0.42], 0.3, 0.4, 1.0, 0.7);
        let penalized = next_phase(0.42, &[0.42], 0.5, 0.7, 1.0, 0.7);
        assert!((penalized - (clean - 0.1).rem_euclid(1.0)).abs() < 1e-12);
        assert!((0.0..1.0).contains(&penalized));

        // Penalty wraps when it would go negative.
        let low = next_phase(0.05, &[0.05], 0.5, 0.7, 1.0, 0.7);
        assert!((low - 0.95).abs() < 1e-12);
    }

    #[test]
    fn formation_force_is_proportional_to_spacing_error() {
        // Neighbor 20 apart with desired spacing 10: magnitude
        // (10 - 20) * 0.1 along the unit vector toward the neighbor.
        let far = formation_force([0.0; 3], &[[20.0, 0.0, 0.0]], DESIRED_FORMATION_DISTANCE);
        assert!((far[0] - (-1.0)).abs() < 1e-12, "expected -1.0, got {}", far[0]);
        // Neighbor 4 apart: (10 - 4) * 0.1 toward the neighbor.
        let near = formation_force([0.0; 3], &[[4.0, 0.0, 0.0]], DESIRED_FORMATION_DISTANCE);
        assert!((near[0] - 0.6).abs() < 1e-12);
        assert_eq!(near[1], 0.0);
        assert_eq!(near[2], 0.0);
    }

    #[test]
    fn formation_force_sums_over_neighbors() {
        let neighbors = [[4.0, 0.0, 0.0], [0.0, 4.0, 0.0]];
        let force = formation_force([0.0; 3], &neighbors, 10.0);
        assert!((force[0] - 0.6).abs() < 1e-12);
        assert!((force[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn formation_force_ignores_coincident_neighbors() {
        let force = formation_force([1.0, 2.0, 3.0], &[[1.0, 2.0, 3.0]], 10.0);
        assert_eq!(force, [0.0, 0.0, 0.0]);
    }
}
