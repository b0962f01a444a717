//! Bio-inspired drone swarm synchronization engine.
//!
//! Advances a fixed population of drones one discrete tick at a time:
//! Kuramoto phase coupling under a biological timing constraint, fish-school
//! steering forces, damped 3D integration, energy accounting, and a scalar
//! multi-objective cost evaluated over every snapshot.

pub mod config;
pub mod constants;
pub mod drone;
pub mod kinematics;
pub mod metrics;
pub mod optimization;
pub mod spatial;
pub mod sync;
pub mod world;

pub use config::{SwarmConfig, SwarmConfigError};
pub use drone::{Drone, DroneStatus};
pub use metrics::{RunSummary, TickMetrics};
pub use optimization::{OptimizationResult, TuningParams};
pub use world::SwarmWorld;
