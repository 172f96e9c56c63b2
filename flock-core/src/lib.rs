//! Emergent flocking ("boids") on a bounded 2D plane.
//!
//! The crate is the simulation core only: it consumes a tick and a viewport
//! and produces updated agent positions. Rendering and the fixed-interval
//! scheduler that drives [`FlockSim::tick`] live with the caller.

pub mod boid;
pub mod config;
pub mod sim;
pub mod spatial;
pub mod steering;
pub mod vector;

pub use boid::Boid;
pub use config::{BoundaryPolicy, ConfigError, FlockConfig, SpatialStrategy, Viewport};
pub use sim::{DrawCommand, FlockSim};
pub use vector::Vec2;
