use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use swarmsync_core::constants::DEFAULT_TARGET_PERFORMANCE;
use swarmsync_core::{RunSummary, SwarmConfig, SwarmWorld};

const WARMUP_STEPS: u64 = 10;
const BENCHMARK_STEPS: u64 = 200;
const TARGET_TPS: f64 = 100.0;

#[derive(Parser)]
#[command(name = "swarmsync")]
#[command(about = "Drone Swarm Synchronization Simulator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation
    Run {
        /// Path to config file (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for results (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of ticks to run
        #[arg(long, default_value_t = 1000)]
        steps: u64,

        /// Sample metrics every N ticks
        #[arg(long, default_value_t = 10)]
        sample_every: u64,

        /// Retune K and lambda from recent sync scores every N ticks
        #[arg(long)]
        adapt_every: Option<u64>,
    },
    /// Run the performance benchmark suite
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<SwarmConfig> {
    match path {
        Some(path) => {
            let file = File::open(path).context("failed to open config file")?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("failed to parse config")
        }
        None => Ok(SwarmConfig::default()),
    }
}

fn run_benchmark(num_drones: usize, seed: u64) -> Result<()> {
    let config = SwarmConfig {
        num_drones,
        seed,
        ..SwarmConfig::default()
    };
    config
        .validate()
        .context("benchmark config validation error")?;

    let mut world = SwarmWorld::new(config)?;

    // Warmup
    for _ in 0..WARMUP_STEPS {
        world.step();
    }

    let start = Instant::now();
    for _ in 0..BENCHMARK_STEPS {
        world.step();
    }
    let avg_tick_us = start.elapsed().as_micros() as f64 / BENCHMARK_STEPS as f64;
    let ticks_per_sec = 1_000_000.0 / avg_tick_us;

    println!("--- {num_drones} drones ---");
    println!("  Avg tick:    {avg_tick_us:.0} us ({ticks_per_sec:.1} ticks/sec)");
    println!(
        "  Sync score:  {:.3} (violations: {})",
        world.metrics().sync_score,
        world.timing_violations()
    );
    let verdict = if ticks_per_sec >= TARGET_TPS {
        "GO"
    } else {
        "NO-GO"
    };
    println!("  Verdict:     {verdict} (target: >={TARGET_TPS} ticks/sec)");
    println!();
    Ok(())
}

fn run_simulation(
    world: &mut SwarmWorld,
    steps: u64,
    sample_every: u64,
    adapt_every: Option<u64>,
) -> RunSummary {
    let Some(adapt_every) = adapt_every else {
        return world.run_experiment(steps, sample_every);
    };

    // Retune between blocks of ticks; samples accumulate across blocks.
    let adapt_every = adapt_every.max(1);
    let mut samples = Vec::new();
    let mut done = 0;
    while done < steps && world.is_active() {
        let block = adapt_every.min(steps - done);
        let mut summary = world.run_experiment(block, sample_every);
        samples.append(&mut summary.samples);
        world.adapt_parameters(DEFAULT_TARGET_PERFORMANCE);
        done += block;
    }
    RunSummary {
        schema_version: 1,
        steps,
        sample_every,
        final_metrics: *world.metrics(),
        energy_efficiency: world.energy_efficiency(),
        samples,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&SwarmConfig::default())?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p swarmsync-cli --release -- benchmark");
                eprintln!();
            }
            println!("=== Swarm Synchronization Benchmark ===");
            println!("Warmup: {WARMUP_STEPS} ticks, Benchmark: {BENCHMARK_STEPS} ticks");
            println!();
            for num_drones in [12, 48, 192, 768] {
                run_benchmark(num_drones, 42)?;
            }
        }
        Commands::Run {
            config,
            out,
            steps,
            sample_every,
            adapt_every,
        } => {
            let swarm_config = load_config(config.as_ref())?;
            swarm_config.validate().context("config validation error")?;

            let mut world = SwarmWorld::new(swarm_config)?;
            println!("Simulating {} drones for {} ticks...", world.drones.len(), steps);

            let summary = run_simulation(&mut world, steps, sample_every, adapt_every);

            println!(
                "Run complete. objective={:.2} sync={:.3} energy={:.1} violations={}",
                summary.final_metrics.objective,
                summary.final_metrics.sync_score,
                summary.final_metrics.total_energy,
                summary.final_metrics.timing_violations,
            );

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;

                let summary_path = out_dir.join("summary.json");
                let file = File::create(summary_path).context("failed to create summary file")?;
                serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;

                let snapshot_path = out_dir.join("snapshot.json");
                let file =
                    File::create(snapshot_path).context("failed to create snapshot file")?;
                serde_json::to_writer_pretty(file, &world.drones)
                    .context("failed to write snapshot")?;

                println!("Results saved to {:?}", out_dir);
            }
        }
    }
    Ok(())
}
