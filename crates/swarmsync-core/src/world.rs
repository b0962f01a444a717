//! Simulation orchestrator: owns the drone collection and the active
//! parameter set, and advances the swarm one snapshot per tick.

use crate::config::{SwarmConfig, SwarmConfigError};
use crate::constants::{
    ALIGNMENT_RADIUS, COHESION_RADIUS, ENERGY_DRAIN_BASE, ENERGY_DRAIN_PER_SPEED,
    IDLE_RECHARGE_PER_TICK, MAX_ENERGY, SCHOOLING_ACCEL_GAIN, SEPARATION_RADIUS, SYNC_HISTORY_LEN,
};
use crate::drone::{Drone, DroneStatus};
use crate::kinematics::{self, SchoolingNeighbor};
use crate::metrics::{RunSummary, TickMetrics};
use crate::optimization::{self, TuningParams};
use crate::spatial;
use crate::sync;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

pub struct SwarmWorld {
    /// Drone ids are dense indices into this vector; a tick replaces the
    /// whole vector but never reorders it.
    pub drones: Vec<Drone>,
    // Keep config private to preserve validation invariants.
    config: SwarmConfig,
    step_count: u64,
    metrics: TickMetrics,
    sync_history: Vec<f64>,
    active: bool,
}

impl SwarmWorld {
    /// Validate the config and materialize the initial population from its
    /// seed.
    pub fn new(config: SwarmConfig) -> Result<Self, SwarmConfigError> {
        config.validate()?;
        let drones = spawn_drones(&config);
        Ok(Self {
            drones,
            config,
            step_count: 0,
            metrics: TickMetrics::default(),
            sync_history: Vec::new(),
            active: true,
        })
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Swap the parameter set between ticks. Rejected if invalid; the
    /// previous config stays in effect.
    pub fn set_config(&mut self, config: SwarmConfig) -> Result<(), SwarmConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }

    pub fn timing_violations(&self) -> usize {
        self.metrics.timing_violations
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// External start/stop gate honored by `run_experiment`. `step` itself
    /// stays callable so a driver can single-step a paused world.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Replace the whole population with a fresh draw from `config.seed`,
    /// discarding metrics and tuning history.
    pub fn reset(&mut self) {
        self.drones = spawn_drones(&self.config);
        self.step_count = 0;
        self.metrics = TickMetrics::default();
        self.sync_history.clear();
    }

    /// Advance the swarm one tick. Every drone is updated purely from the
    /// previous snapshot; the next snapshot is materialized separately and
    /// published only once complete, so no drone ever observes another
    /// drone's same-tick update.
    pub fn step(&mut self) -> TickMetrics {
        self.step_count += 1;
        let config = &self.config;
        let step_count = self.step_count;

        let tree = spatial::build_index(&self.drones);
        let prev = &self.drones;
        let mut next = Vec::with_capacity(prev.len());

        for drone in prev {
            // 1. Energy gate: too low to move or resync; recharge instead.
            if drone.energy < config.energy_threshold {
                let mut gated = drone.clone();
                gated.status = DroneStatus::Idle;
                gated.energy = (drone.energy + IDLE_RECHARGE_PER_TICK).min(MAX_ENERGY);
                next.push(gated);
                continue;
            }

            // 2. Neighbor discovery against previous-tick positions.
            let comm_ids =
                spatial::neighbors_within(&tree, drone.position, config.comm_range, drone.id);
            let neighbor_phases: Vec<f64> = comm_ids
                .iter()
                .map(|&id| prev[id as usize].phase)
                .collect();

            // 3. Phase update under the biological timing constraint.
            let phase = sync::next_phase(
                drone.phase,
                &neighbor_phases,
                drone.strike_time,
                drone.air_time,
                config.total_sync_period,
                config.coupling_strength,
            );

            // 4. Schooling force becomes acceleration; damped integration.
            let school_ids = spatial::neighbors_within(
                &tree,
                drone.position,
                config.interaction_range,
                drone.id,
            );
            let school_neighbors: Vec<SchoolingNeighbor> = school_ids
                .iter()
                .map(|&id| SchoolingNeighbor {
                    position: prev[id as usize].position,
                    velocity: prev[id as usize].velocity,
                })
                .collect();
            let force = kinematics::schooling_force(
                drone.position,
                drone.velocity,
                &school_neighbors,
                SEPARATION_RADIUS,
                ALIGNMENT_RADIUS,
                COHESION_RADIUS,
            );
            let acceleration = [
                force[0] * SCHOOLING_ACCEL_GAIN,
                force[1] * SCHOOLING_ACCEL_GAIN,
                force[2] * SCHOOLING_ACCEL_GAIN,
            ];
            let (position, velocity) = kinematics::integrate_3d(
                drone.position,
                drone.velocity,
                acceleration,
                config.dt,
                config.fluid_density,
            );

            // 5. Energy drains with the new speed, floored at zero.
            let speed =
                (velocity[0] * velocity[0] + velocity[1] * velocity[1] + velocity[2] * velocity[2])
                    .sqrt();
            let energy =
                (drone.energy - (ENERGY_DRAIN_PER_SPEED * speed + ENERGY_DRAIN_BASE)).max(0.0);

            // 6. Syncing while still converging on the first comm-range
            //    neighbor's previous phase, active otherwise.
            let mut status = DroneStatus::Active;
            if let Some(&first) = comm_ids.first() {
                let phase_diff = (phase - prev[first as usize].phase).abs();
                if phase_diff > 0.1 && phase_diff < 0.9 {
                    status = DroneStatus::Syncing;
                }
            }

            next.push(Drone {
                id: drone.id,
                position,
                velocity,
                phase,
                energy,
                status,
                last_sync_step: step_count,
                strike_time: drone.strike_time,
                air_time: drone.air_time,
            });
        }

        // 7. Publish the snapshot, then aggregate tick metrics from it.
        self.drones = next;

        let phases: Vec<f64> = self.drones.iter().map(|d| d.phase).collect();
        let energies: Vec<f64> = self.drones.iter().map(|d| d.energy).collect();
        let sync_score = sync::sync_score(&phases);
        let timing_violations = self
            .drones
            .iter()
            .filter(|d| d.violates_timing(self.config.total_sync_period))
            .count();
        let cost = optimization::operational_cost(
            self.config.total_sync_period,
            self.drones.len(),
            1.0,
        );
        let result = optimization::evaluate_strategy(
            cost,
            &energies,
            sync_score,
            self.config.lambda_penalty,
        );
        self.metrics = TickMetrics::from_optimization(self.step_count, result, timing_violations);

        self.sync_history.push(sync_score);
        if self.sync_history.len() > SYNC_HISTORY_LEN {
            self.sync_history.remove(0);
        }

        self.metrics
    }

    /// Bang-bang retune of K and lambda from the recent sync-score
    /// history. Runs between ticks only; a no-op until three ticks of
    /// history exist.
    pub fn adapt_parameters(&mut self, target_performance: f64) -> TuningParams {
        let tuned = optimization::adapt_parameters(
            TuningParams {
                coupling_strength: self.config.coupling_strength,
                lambda_penalty: self.config.lambda_penalty,
            },
            &self.sync_history,
            target_performance,
        );
        self.config.coupling_strength = tuned.coupling_strength;
        self.config.lambda_penalty = tuned.lambda_penalty;
        tuned
    }

    /// Diagnostic efficiency of the current snapshot: mean drone distance
    /// from the swarm centroid and mean speed against the last sync score.
    pub fn energy_efficiency(&self) -> f64 {
        let count = self.drones.len().max(1) as f64;
        let mut centroid = [0.0f64; 3];
        for drone in &self.drones {
            for axis in 0..3 {
                centroid[axis] += drone.position[axis];
            }
        }
        for coord in &mut centroid {
            *coord /= count;
        }
        let distances: Vec<f64> = self
            .drones
            .iter()
            .map(|d| {
                let dx = d.position[0] - centroid[0];
                let dy = d.position[1] - centroid[1];
                let dz = d.position[2] - centroid[2];
                (dx * dx + dy * dy + dz * dz).sqrt()
            })
            .collect();
        let speeds: Vec<f64> = self.drones.iter().map(Drone::speed).collect();
        optimization::energy_efficiency(&distances, &speeds, self.metrics.sync_score)
    }

    /// Step up to `steps` ticks while active, sampling metrics every
    /// `sample_every` ticks.
    pub fn run_experiment(&mut self, steps: u64, sample_every: u64) -> RunSummary {
        let sample_every = sample_every.max(1);
        let mut samples = Vec::new();
        for i in 0..steps {
            if !self.active {
                break;
            }
            let metrics = self.step();
            if (i + 1) % sample_every == 0 {
                samples.push(metrics);
            }
        }
        RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            final_metrics: self.metrics,
            energy_efficiency: self.energy_efficiency(),
            samples,
        }
    }
}

/// Draw the initial population from the config's seed. Per drone, the
/// draw order is position, velocity, phase, energy, status, strike time,
/// air time; changing it changes every seeded run.
fn spawn_drones(config: &SwarmConfig) -> Vec<Drone> {
    let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
    (0..config.num_drones)
        .map(|i| {
            let position = [
                rng.random_range(-40.0..40.0),
                rng.random_range(-40.0..40.0),
                rng.random_range(10.0..30.0),
            ];
            let velocity = [
                rng.random_range(-2.5..2.5),
                rng.random_range(-2.5..2.5),
                rng.random_range(-1.0..1.0),
            ];
            let phase = rng.random::<f64>();
            let energy = rng.random_range(60.0..100.0);
            let status = if rng.random::<f64>() > 0.8 {
                DroneStatus::Idle
            } else {
                DroneStatus::Active
            };
            let strike_time = rng.random_range(0.2..0.6);
            let air_time = rng.random_range(0.3..0.8);
            Drone {
                id: i as u32,
                position,
                velocity,
                phase,
                energy,
                status,
                last_sync_step: 0,
                strike_time,
                air_time,
            }
        })
        .collect()
}
