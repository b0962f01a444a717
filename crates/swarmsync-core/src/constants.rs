//! Fixed gains, radii and penalties of the closed-form swarm rules.

/// Neighbors closer than this repel (schooling separation term).
pub const SEPARATION_RADIUS: f64 = 5.0;
/// Neighbors within this contribute to velocity matching.
pub const ALIGNMENT_RADIUS: f64 = 10.0;
/// Neighbors within this pull the drone toward their mean position.
pub const COHESION_RADIUS: f64 = 15.0;

pub const SEPARATION_WEIGHT: f64 = 1.5;
pub const ALIGNMENT_WEIGHT: f64 = 1.0;
pub const COHESION_WEIGHT: f64 = 1.0;

/// Schooling force to acceleration gain applied by the tick loop.
pub const SCHOOLING_ACCEL_GAIN: f64 = 0.1;

/// Phase delay applied when strike + air time exceed the sync period.
pub const TIMING_PHASE_PENALTY: f64 = 0.1;

/// Target inter-drone spacing for pairwise formation control.
pub const DESIRED_FORMATION_DISTANCE: f64 = 10.0;
/// Spring gain of the formation-control force.
pub const FORMATION_FORCE_GAIN: f64 = 0.1;

pub const MAX_ENERGY: f64 = 100.0;
/// Energy regained per tick while gated below the idle threshold.
pub const IDLE_RECHARGE_PER_TICK: f64 = 2.0;
/// Energy drained per unit of speed each tick.
pub const ENERGY_DRAIN_PER_SPEED: f64 = 0.05;
/// Baseline energy drained each tick regardless of motion.
pub const ENERGY_DRAIN_BASE: f64 = 0.1;

/// Interpolation steps per sampled strike trajectory (samples = steps + 1).
pub const TRAJECTORY_SAMPLES: usize = 20;

/// Ticks of sync-score history retained for adaptive tuning.
pub const SYNC_HISTORY_LEN: usize = 32;
/// Default sync-score target for the bang-bang parameter tuner.
pub const DEFAULT_TARGET_PERFORMANCE: f64 = 0.8;
