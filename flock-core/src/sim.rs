//! The flock simulation: agent ownership and the per-tick state machine.
//!
//! One tick runs three strictly ordered phases:
//!   1. Acceleration — every agent's steering forces are computed against the
//!      frozen pre-tick swarm into a private slot of the force buffer. No
//!      position or velocity is touched, so the pass is parallel.
//!   2. Integration — forces fold into velocity (speed-clamped) and position.
//!   3. Boundary — the configured policy (wrap or clamp) is applied.
//!
//! Accelerations go to a separate buffer rather than straight into the
//! agents, so an agent updated early in a pass can never bias a later
//! agent's neighbor calculation within the same tick.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::boid::Boid;
use crate::config::{BoundaryPolicy, ConfigError, FlockConfig, SpatialStrategy, Viewport};
use crate::spatial::{self, UniformGrid};
use crate::steering;
use crate::vector::Vec2;

/// One draw instruction for the external render sink. The core never draws;
/// it only says where and how big.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

pub struct FlockSim {
    boids: Vec<Boid>,
    /// Per-agent force output, reused across ticks.
    forces: Vec<Vec2>,
    config: FlockConfig,
    viewport: Viewport,
}

impl FlockSim {
    /// Build a simulation with a randomly spawned swarm.
    pub fn new(config: FlockConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, viewport, &mut rand::thread_rng()))
    }

    /// Build a simulation whose spawn is reproducible from a seed.
    pub fn new_seeded(
        config: FlockConfig,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(
            config,
            viewport,
            &mut StdRng::seed_from_u64(seed),
        ))
    }

    fn with_rng<R: Rng + ?Sized>(config: FlockConfig, viewport: Viewport, rng: &mut R) -> Self {
        // Ids are dense indices into the swarm; steering relies on that.
        let boids = (0..config.swarm_size)
            .map(|id| Boid::spawn(id as u32, viewport, config.starting_speed, rng))
            .collect();
        Self {
            boids,
            forces: Vec::new(),
            config,
            viewport,
        }
    }

    /// Advance the simulation by one fixed step.
    pub fn tick(&mut self) {
        let config = self.config;
        let viewport = self.viewport;

        // Acceleration phase, against the frozen pre-tick snapshot.
        let grid = match config.spatial {
            SpatialStrategy::UniformGrid => Some(UniformGrid::build(
                &self.boids,
                config.detection_radius,
                viewport,
            )),
            SpatialStrategy::BruteForce => None,
        };
        let boids = &self.boids;
        boids
            .par_iter()
            .map(|boid| steering_forces(boid, boids, grid.as_ref(), &config, viewport))
            .collect_into_vec(&mut self.forces);

        // Integration phase.
        for (boid, force) in self.boids.iter_mut().zip(&self.forces) {
            boid.acceleration = *force;
            boid.integrate(config.max_speed);
        }

        // Boundary phase.
        for boid in &mut self.boids {
            match config.boundary {
                BoundaryPolicy::Wrap => {
                    boid.position.x = wrap_axis(boid.position.x, viewport.width);
                    boid.position.y = wrap_axis(boid.position.y, viewport.height);
                }
                BoundaryPolicy::Clamp => {
                    boid.position.x = clamp_axis(boid.position.x, viewport.width);
                    boid.position.y = clamp_axis(boid.position.y, viewport.height);
                }
            }
        }
    }

    /// Read-only snapshot of the swarm.
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Per-agent draw commands for the render sink.
    pub fn render_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        let size = self.config.agent_size;
        self.boids.iter().map(move |boid| DrawCommand {
            x: boid.position.x,
            y: boid.position.y,
            size,
        })
    }

    /// Replace the viewport, e.g. on window resize.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.viewport = Viewport::new(width, height)?;
        Ok(())
    }
}

fn steering_forces(
    boid: &Boid,
    boids: &[Boid],
    grid: Option<&UniformGrid>,
    config: &FlockConfig,
    viewport: Viewport,
) -> Vec2 {
    let close = neighbors(boids, boid, config.separation_radius, grid);
    let seen = neighbors(boids, boid, config.detection_radius, grid);

    let mut force = steering::separation(boid, boids, &close, config.separation_weight);
    force += steering::alignment(boids, &seen, config.alignment_weight);
    force += steering::cohesion(boid, boids, &seen, config.cohesion_weight);
    // Wall avoidance and wraparound are mutually exclusive: with a torus
    // there is no wall to avoid.
    if config.boundary == BoundaryPolicy::Clamp {
        force += steering::avoidance(boid, viewport, config.avoidance_margin);
    }
    force
}

fn neighbors(boids: &[Boid], origin: &Boid, radius: f32, grid: Option<&UniformGrid>) -> Vec<u32> {
    match grid {
        Some(grid) => grid.neighbors_of(boids, origin, radius),
        None => spatial::neighbors_of(boids, origin, radius),
    }
}

/// Wrap a coordinate onto [0, dim). A coordinate exactly at `dim` wraps to 0;
/// negative coordinates come back in from the far edge.
fn wrap_axis(value: f32, dim: f32) -> f32 {
    (value % dim + dim) % dim
}

/// Pin a coordinate one unit inside the boundary.
fn clamp_axis(value: f32, dim: f32) -> f32 {
    value.clamp(1.0, (dim - 1.0).max(1.0))
}
