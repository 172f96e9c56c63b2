use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use flock_core::{FlockConfig, FlockSim, Viewport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the flock simulation", long_about = None)]
struct Args {
    /// JSON file with flock parameters (fields omitted there use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Viewport width in world units
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height in world units
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Number of ticks to run (0 = run until interrupted)
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Seed for a reproducible run; omit for a random swarm
    #[arg(long)]
    seed: Option<u64>,

    /// How many ticks between stats log lines
    #[arg(long, default_value_t = 100)]
    stats_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

struct FlockClient {
    sim: FlockSim,
    stats_every: u64,
}

impl FlockClient {
    fn new(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => load_config(path)?,
            None => FlockConfig::default(),
        };
        config
            .validate()
            .context("invalid flock configuration")?;
        let viewport = Viewport::new(args.width, args.height)
            .context("invalid viewport dimensions")?;

        let sim = match args.seed {
            Some(seed) => {
                log::info!("Seeding swarm with {}", seed);
                FlockSim::new_seeded(config, viewport, seed)?
            }
            None => FlockSim::new(config, viewport)?,
        };
        log::info!(
            "Spawned {} agents in a {}x{} viewport ({:?} boundary, {:?} neighbors)",
            config.swarm_size,
            viewport.width,
            viewport.height,
            config.boundary,
            config.spatial,
        );
        Ok(Self {
            sim,
            stats_every: args.stats_every.max(1),
        })
    }

    fn run(&mut self, ticks: u64) {
        let interval = Duration::from_millis(self.sim.config().tick_interval_ms);
        let started = Instant::now();
        let mut tick = 0u64;

        loop {
            let tick_started = Instant::now();
            self.sim.tick();
            self.present();
            tick += 1;

            if tick % self.stats_every == 0 {
                let (centroid_x, centroid_y, avg_speed) = self.stats();
                log::info!(
                    "tick {}: centroid ({:.1}, {:.1}), avg speed {:.2}",
                    tick,
                    centroid_x,
                    centroid_y,
                    avg_speed
                );
            }

            if ticks != 0 && tick >= ticks {
                break;
            }
            if let Some(remaining) = interval.checked_sub(tick_started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        log::info!("Ran {} ticks in {:.2?}", tick, started.elapsed());
    }

    /// The render sink. A real front end would draw a square per command;
    /// headless, they go to the trace log.
    fn present(&self) {
        if log::log_enabled!(log::Level::Trace) {
            for command in self.sim.render_commands() {
                log::trace!(
                    "draw ({:.1}, {:.1}) size {}",
                    command.x,
                    command.y,
                    command.size
                );
            }
        }
    }

    fn stats(&self) -> (f32, f32, f32) {
        let boids = self.sim.boids();
        let count = boids.len() as f32;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_speed = 0.0;
        for boid in boids {
            sum_x += boid.position.x;
            sum_y += boid.position.y;
            sum_speed += boid.velocity.magnitude();
        }
        (sum_x / count, sum_y / count, sum_speed / count)
    }
}

fn load_config(path: &Path) -> Result<FlockConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut client = FlockClient::new(&args)?;
    client.run(args.ticks);
    Ok(())
}
