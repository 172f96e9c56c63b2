use rand::Rng;

use crate::config::Viewport;
use crate::vector::Vec2;

/// A single flocking agent.
///
/// The id is stable for the lifetime of the run and is how an agent is
/// excluded from its own neighbor sets; two agents can coincide in position,
/// so identity is never positional. Acceleration is transient scratch state,
/// recomputed from scratch every tick.
#[derive(Debug, Clone)]
pub struct Boid {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Boid {
    pub fn new(id: u32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vec2::zero(),
        }
    }

    /// Spawn an agent at a random position inside the viewport with a random
    /// heading at `starting_speed`.
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        viewport: Viewport,
        starting_speed: f32,
        rng: &mut R,
    ) -> Self {
        let position = Vec2::new(
            rng.gen_range(0.0..viewport.width),
            rng.gen_range(0.0..viewport.height),
        );
        // A random direction, not a random point: normalize before scaling
        // so every spawn speed is exactly starting_speed.
        let heading = loop {
            let v = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            if v.magnitude() > 0.0 {
                break v.normalize();
            }
        };
        Self::new(id, position, heading * starting_speed)
    }

    /// Fold the tick's acceleration into velocity (clamped to `max_speed`,
    /// heading preserved), then advance position. Acceleration is cleared so
    /// the next tick starts fresh.
    pub fn integrate(&mut self, max_speed: f32) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::zero();
    }
}
