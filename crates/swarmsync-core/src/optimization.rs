//! Multi-objective cost evaluation and bang-bang parameter tuning.

use serde::{Deserialize, Serialize};

/// Scalar objective breakdown for one tick. Lower objective is better: it
/// rewards synchronization and penalizes cost and energy burn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub cost: f64,
    pub total_energy: f64,
    pub sync_score: f64,
    pub objective: f64,
}

/// Evaluate `min C + sum(E) - lambda * S` over one swarm snapshot.
pub fn evaluate_strategy(
    cost: f64,
    energies: &[f64],
    sync_score: f64,
    lambda_penalty: f64,
) -> OptimizationResult {
    let total_energy: f64 = energies.iter().sum();
    OptimizationResult {
        cost,
        total_energy,
        sync_score,
        objective: cost + total_energy - lambda_penalty * sync_score,
    }
}

/// Per-tick operating cost. A scaling heuristic, not a physical law.
pub fn operational_cost(mission_time: f64, drone_count: usize, complexity: f64) -> f64 {
    mission_time * drone_count as f64 * complexity * 0.5
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Diagnostic efficiency score, floored at zero. Tighter spacing, lower
/// speeds and higher synchrony all score better. Not fed back into the
/// tick loop.
pub fn energy_efficiency(distances: &[f64], velocities: &[f64], sync_score: f64) -> f64 {
    let efficiency = 1.0 - (0.01 * mean(distances) + 0.05 * mean(velocities)) + 0.3 * sync_score;
    efficiency.max(0.0)
}

/// The two externally tunable coupling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TuningParams {
    pub coupling_strength: f64,
    pub lambda_penalty: f64,
}

/// Bang-bang retune of K and lambda from recent performance. Not a
/// gradient method: when the mean of the last three samples trails the
/// target by more than 0.1 both parameters are nudged up, when it exceeds
/// the target by more than 0.1 both are relaxed, otherwise nothing
/// changes. Outputs stay within [0.1, 1.0].
pub fn adapt_parameters(
    current: TuningParams,
    performance_history: &[f64],
    target_performance: f64,
) -> TuningParams {
    if performance_history.len() < 3 {
        return current;
    }

    let recent = &performance_history[performance_history.len() - 3..];
    let trend = recent.iter().sum::<f64>() / 3.0 - target_performance;

    let mut tuned = current;
    if trend < -0.1 {
        tuned.coupling_strength = (tuned.coupling_strength + 0.05).min(1.0);
        tuned.lambda_penalty = (tuned.lambda_penalty + 0.02).min(1.0);
    } else if trend > 0.1 {
        tuned.coupling_strength = (tuned.coupling_strength - 0.02).max(0.1);
        tuned.lambda_penalty = (tuned.lambda_penalty - 0.01).max(0.1);
    }
    tuned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_strategy_matches_literal_expansion() {
        let result = evaluate_strategy(10.0, &[50.0, 60.0], 0.5, 0.8);
        assert_eq!(result.total_energy, 110.0);
        assert!((result.objective - 119.6).abs() < 1e-12);
        assert_eq!(result.cost, 10.0);
        assert_eq!(result.sync_score, 0.5);
    }

    #[test]
    fn evaluate_strategy_handles_empty_energy_list() {
        let result = evaluate_strategy(5.0, &[], 1.0, 0.5);
        assert_eq!(result.total_energy, 0.0);
        assert!((result.objective - 4.5).abs() < 1e-12);
    }

    #[test]
    fn operational_cost_scales_linearly() {
        assert_eq!(operational_cost(1.0, 12, 1.0), 6.0);
        assert_eq!(operational_cost(2.0, 12, 1.0), 12.0);
        assert_eq!(operational_cost(2.0, 12, 0.5), 6.0);
    }

    #[test]
    fn energy_efficiency_is_floored_at_zero() {
        let value = energy_efficiency(&[500.0], &[100.0], 0.0);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn energy_efficiency_rewards_synchrony() {
        let low = energy_efficiency(&[10.0], &[2.0], 0.0);
        let high = energy_efficiency(&[10.0], &[2.0], 1.0);
        assert!((high - low - 0.3).abs() < 1e-12);
    }

    #[test]
    fn energy_efficiency_of_empty_inputs_uses_zero_means() {
        assert!((energy_efficiency(&[], &[], 0.5) - 1.15).abs() < 1e-12);
    }

    #[test]
    fn adapt_parameters_is_noop_on_short_history() {
        let current = TuningParams {
            coupling_strength: 0.7,
            lambda_penalty: 0.8,
        };
        assert_eq!(adapt_parameters(current, &[], 0.8), current);
        assert_eq!(adapt_parameters(current, &[0.1, 0.2], 0.8), current);
    }

    #[test]
    fn adapt_parameters_raises_coupling_when_trailing_target() {
        let current = TuningParams {
            coupling_strength: 0.7,
            lambda_penalty: 0.8,
        };
        let tuned = adapt_parameters(current, &[0.2, 0.3, 0.25], 0.8);
        assert!((tuned.coupling_strength - 0.75).abs() < 1e-12);
        assert!((tuned.lambda_penalty - 0.82).abs() < 1e-12);
    }

    #[test]
    fn adapt_parameters_relaxes_when_ahead_of_target() {
        let current = TuningParams {
            coupling_strength: 0.7,
            lambda_penalty: 0.8,
        };
        let tuned = adapt_parameters(current, &[0.95, 0.95, 0.95], 0.8);
        assert!((tuned.coupling_strength - 0.68).abs() < 1e-12);
        assert!((tuned.lambda_penalty - 0.79).abs() < 1e-12);
    }

    #[test]
    fn adapt_parameters_holds_inside_deadband() {
        let current = TuningParams {
            coupling_strength: 0.7,
            lambda_penalty: 0.8,
        };
        assert_eq!(adapt_parameters(current, &[0.8, 0.82, 0.78], 0.8), current);
    }

    #[test]
    fn adapt_parameters_clamps_to_unit_band() {
        let high = TuningParams {
            coupling_strength: 0.99,
            lambda_penalty: 0.99,
        };
        let tuned = adapt_parameters(high, &[0.0, 0.0, 0.0], 0.8);
        assert_eq!(tuned.coupling_strength, 1.0);
        assert_eq!(tuned.lambda_penalty, 1.0);

        let low = TuningParams {
            coupling_strength: 0.11,
            lambda_penalty: 0.105,
        };
        let tuned = adapt_parameters(low, &[1.0, 1.0, 1.0], 0.8);
        assert!((tuned.coupling_strength - 0.1).abs() < 1e-12);
        assert_eq!(tuned.lambda_penalty, 0.1);
    }

    #[test]
    fn adapt_parameters_uses_only_last_three_samples() {
        let current = TuningParams {
            coupling_strength: 0.5,
            lambda_penalty: 0.5,
        };
        // Old terrible samples must be ignored; recent mean sits on target.
        let history = [0.0, 0.0, 0.0, 0.8, 0.8, 0.8];
        assert_eq!(adapt_parameters(current, &history, 0.8), current);
    }
}
