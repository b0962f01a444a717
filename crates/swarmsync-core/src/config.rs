use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Tunable swarm parameters. Read-only to the engine during a tick; the
/// external controller may swap them between ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Deterministic seed for reproducible initialization.
    pub seed: u64,
    /// Fixed population size; the collection never grows or shrinks.
    pub num_drones: usize,
    /// Nominal synchronization cycle T in seconds.
    pub total_sync_period: f64,
    /// Kuramoto coupling gain K.
    pub coupling_strength: f64,
    /// Synchronization reward weight lambda in the objective.
    pub lambda_penalty: f64,
    /// Gravitational acceleration; used only by the projectile helper.
    pub gravity: f64,
    /// Energy percentage below which a drone idles and recharges.
    pub energy_threshold: f64,
    /// Radius supplying neighbor phases for coupling.
    pub comm_range: f64,
    /// Radius supplying neighbor kinematics for schooling.
    pub interaction_range: f64,
    /// Tick timestep in seconds.
    pub dt: f64,
    /// Medium density feeding the viscous damping factor.
    pub fluid_density: f64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_drones: 12,
            total_sync_period: 1.0,
            coupling_strength: 0.7,
            lambda_penalty: 0.8,
            gravity: 9.81,
            energy_threshold: 30.0,
            comm_range: 30.0,
            interaction_range: 25.0,
            dt: 0.1,
            fluid_density: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwarmConfigError {
    InvalidNumDrones,
    TooManyDrones { max: usize, actual: usize },
    InvalidTotalSyncPeriod,
    InvalidCouplingStrength,
    InvalidLambdaPenalty,
    InvalidGravity,
    InvalidEnergyThreshold,
    InvalidCommRange,
    InvalidInteractionRange,
    InvalidDt,
    InvalidFluidDensity,
}

impl fmt::Display for SwarmConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwarmConfigError::InvalidNumDrones => {
                write!(f, "num_drones must be greater than 0")
            }
            SwarmConfigError::TooManyDrones { max, actual } => {
                write!(f, "num_drones ({actual}) exceeds supported maximum ({max})")
            }
            SwarmConfigError::InvalidTotalSyncPeriod => {
                write!(f, "total_sync_period must be positive and finite")
            }
            SwarmConfigError::InvalidCouplingStrength => {
                write!(f, "coupling_strength must be non-negative and finite")
            }
            SwarmConfigError::InvalidLambdaPenalty => {
                write!(f, "lambda_penalty must be non-negative and finite")
            }
            SwarmConfigError::InvalidGravity => write!(f, "gravity must be finite"),
            SwarmConfigError::InvalidEnergyThreshold => {
                write!(f, "energy_threshold must be finite and within [0,100]")
            }
            SwarmConfigError::InvalidCommRange => {
                write!(f, "comm_range must be non-negative and finite")
            }
            SwarmConfigError::InvalidInteractionRange => {
                write!(f, "interaction_range must be non-negative and finite")
            }
            SwarmConfigError::InvalidDt => write!(f, "dt must be positive and finite"),
            SwarmConfigError::InvalidFluidDensity => {
                write!(
                    f,
                    "fluid_density must be finite and within [0,{}]",
                    SwarmConfig::MAX_FLUID_DENSITY
                )
            }
        }
    }
}

impl Error for SwarmConfigError {}

impl SwarmConfig {
    pub const MAX_DRONES: usize = 10_000;

    /// Densities above this flip the viscous damping factor negative.
    pub const MAX_FLUID_DENSITY: f64 = 9.5;

    pub fn validate(&self) -> Result<(), SwarmConfigError> {
        if self.num_drones == 0 {
            return Err(SwarmConfigError::InvalidNumDrones);
        }
        if self.num_drones > Self::MAX_DRONES {
            return Err(SwarmConfigError::TooManyDrones {
                max: Self::MAX_DRONES,
                actual: self.num_drones,
            });
        }
        if !(self.total_sync_period.is_finite() && self.total_sync_period > 0.0) {
            return Err(SwarmConfigError::InvalidTotalSyncPeriod);
        }
        if !(self.coupling_strength.is_finite() && self.coupling_strength >= 0.0) {
            return Err(SwarmConfigError::InvalidCouplingStrength);
        }
        if !(self.lambda_penalty.is_finite() && self.lambda_penalty >= 0.0) {
            return Err(SwarmConfigError::InvalidLambdaPenalty);
        }
        if !self.gravity.is_finite() {
            return Err(SwarmConfigError::InvalidGravity);
        }
        if !(self.energy_threshold.is_finite() && (0.0..=100.0).contains(&self.energy_threshold)) {
            return Err(SwarmConfigError::InvalidEnergyThreshold);
        }
        if !(self.comm_range.is_finite() && self.comm_range >= 0.0) {
            return Err(SwarmConfigError::InvalidCommRange);
        }
        if !(self.interaction_range.is_finite() && self.interaction_range >= 0.0) {
            return Err(SwarmConfigError::InvalidInteractionRange);
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SwarmConfigError::InvalidDt);
        }
        if !(self.fluid_density.is_finite()
            && (0.0..=Self::MAX_FLUID_DENSITY).contains(&self.fluid_density))
        {
            return Err(SwarmConfigError::InvalidFluidDensity);
        }
        Ok(())
    }
}
