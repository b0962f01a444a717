use serde::{Deserialize, Serialize};

/// Per-tick classification of a drone, derived from the tick's inputs and
/// never persisted across ticks as independent state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneStatus {
    #[default]
    Active,
    /// Still converging on the first communication-range neighbor's phase.
    Syncing,
    /// Below the energy threshold; recharging instead of moving.
    Idle,
    /// Declared by the data model; no tick path assigns it.
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Drone {
    /// Dense index into the swarm's drone vector, stable for its lifetime.
    pub id: u32,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    /// Oscillator phase as a fraction of one cycle, in [0, 1).
    pub phase: f64,
    /// Remaining operating energy as a percentage, in [0, 100].
    pub energy: f64,
    pub status: DroneStatus,
    /// Tick counter value of the last full update. Diagnostic only; an
    /// energy-gated tick leaves it untouched.
    pub last_sync_step: u64,
    /// Committed action latency in seconds, fixed at creation.
    pub strike_time: f64,
    /// Ballistic flight duration in seconds, fixed at creation.
    pub air_time: f64,
}

impl Drone {
    /// Whether this drone's committed latency breaks the timing constraint
    /// `strike_time + air_time <= total_sync_period`.
    pub fn violates_timing(&self, total_sync_period: f64) -> bool {
        self.strike_time + self.air_time > total_sync_period
    }

    pub fn speed(&self) -> f64 {
        let [vx, vy, vz] = self.velocity;
        (vx * vx + vy * vy + vz * vz).sqrt()
    }
}
