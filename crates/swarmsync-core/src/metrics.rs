use crate::optimization::OptimizationResult;
use serde::{Deserialize, Serialize};

/// Scalar metrics published after each tick. Recomputed from the fresh
/// snapshot every time, never accumulated.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickMetrics {
    pub step: u64,
    pub cost: f64,
    pub total_energy: f64,
    pub sync_score: f64,
    pub objective: f64,
    pub timing_violations: usize,
}

impl TickMetrics {
    pub fn from_optimization(
        step: u64,
        result: OptimizationResult,
        timing_violations: usize,
    ) -> Self {
        Self {
            step,
            cost: result.cost,
            total_energy: result.total_energy,
            sync_score: result.sync_score,
            objective: result.objective,
            timing_violations,
        }
    }
}

fn default_schema_version() -> u32 {
    1
}

/// Sampled metrics from one headless run, serialized by the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: u64,
    pub sample_every: u64,
    pub final_metrics: TickMetrics,
    /// Diagnostic efficiency of the final snapshot (centroid spread and
    /// mean speed against the final sync score).
    pub energy_efficiency: f64,
    pub samples: Vec<TickMetrics>,
}
