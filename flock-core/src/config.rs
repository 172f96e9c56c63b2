//! Run-wide simulation parameters and their validation.
//!
//! A [`FlockConfig`] is supplied once at simulation construction and is not
//! mutable mid-run. Every numeric field is checked up front so the simulation
//! never runs in an undefined regime (NaN radii, inverted radius order,
//! empty swarm).

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happens to an agent that leaves the viewport.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Toroidal wraparound: positions are taken modulo the viewport
    /// dimensions, so agents reappear on the opposite edge.
    #[default]
    Wrap,
    /// Hard edge stop: positions are pinned one unit inside the boundary.
    /// Wall avoidance steering is active only under this policy.
    Clamp,
}

/// Neighbor discovery algorithm. Both return identical neighbor sets;
/// the grid trades per-tick rebuild cost for cheaper queries on large swarms.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpatialStrategy {
    #[default]
    BruteForce,
    UniformGrid,
}

/// Configuration for a flock simulation run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    /// Initial velocity magnitude for freshly spawned agents.
    pub starting_speed: f32,
    /// Velocity magnitude clamp applied every tick after integration.
    pub max_speed: f32,
    /// Distance threshold for the separation force.
    pub separation_radius: f32,
    /// Distance threshold for alignment/cohesion awareness.
    /// Must be >= `separation_radius`.
    pub detection_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Distance from a wall at which avoidance force begins.
    /// Only consulted under `BoundaryPolicy::Clamp`.
    pub avoidance_margin: f32,
    /// Render footprint, cosmetic only.
    pub agent_size: f32,
    /// Number of agents, fixed for the lifetime of the run.
    pub swarm_size: usize,
    /// Wall-clock period between ticks. The core never sleeps; this is
    /// carried for the external driver.
    pub tick_interval_ms: u64,
    pub boundary: BoundaryPolicy,
    pub spatial: SpatialStrategy,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            starting_speed: 1.0,
            max_speed: 4.0,
            separation_radius: 15.0,
            detection_radius: 25.0,
            separation_weight: 0.5,
            alignment_weight: 0.05,
            cohesion_weight: 0.01,
            avoidance_margin: 50.0,
            agent_size: 2.0,
            swarm_size: 100,
            tick_interval_ms: 10,
            boundary: BoundaryPolicy::Wrap,
            spatial: SpatialStrategy::BruteForce,
        }
    }
}

impl FlockConfig {
    /// Check every parameter. Called by the simulation constructor; exposed
    /// so clients can validate a deserialized config before building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("starting_speed", self.starting_speed),
            ("max_speed", self.max_speed),
            ("separation_radius", self.separation_radius),
            ("detection_radius", self.detection_radius),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
            ("avoidance_margin", self.avoidance_margin),
            ("agent_size", self.agent_size),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "max_speed",
                value: self.max_speed,
            });
        }
        if self.starting_speed > self.max_speed {
            return Err(ConfigError::StartingSpeedExceedsMax {
                starting: self.starting_speed,
                max: self.max_speed,
            });
        }
        if self.detection_radius < self.separation_radius {
            return Err(ConfigError::RadiusOrder {
                detection: self.detection_radius,
                separation: self.separation_radius,
            });
        }
        if self.swarm_size == 0 {
            return Err(ConfigError::EmptySwarm);
        }
        Ok(())
    }
}

/// Width/height bounds of the simulated plane. Read-only to the core during
/// a tick; the external collaborator replaces it on resize.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Errors reported when a configuration would put the simulation in an
/// undefined regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A scalar parameter is NaN or infinite.
    NonFinite { field: &'static str, value: f32 },
    /// A weight, radius, margin or speed is negative.
    Negative { field: &'static str, value: f32 },
    /// A parameter that must be strictly positive is zero or below.
    NonPositive { field: &'static str, value: f32 },
    /// Agents would spawn faster than the speed clamp allows.
    StartingSpeedExceedsMax { starting: f32, max: f32 },
    /// The detection radius must cover the separation radius.
    RadiusOrder { detection: f32, separation: f32 },
    /// A swarm needs at least one agent.
    EmptySwarm,
    /// Viewport dimensions must be finite and positive.
    InvalidViewport { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            ConfigError::StartingSpeedExceedsMax { starting, max } => write!(
                f,
                "starting_speed {} exceeds max_speed {}",
                starting, max
            ),
            ConfigError::RadiusOrder {
                detection,
                separation,
            } => write!(
                f,
                "detection_radius {} is smaller than separation_radius {}",
                detection, separation
            ),
            ConfigError::EmptySwarm => write!(f, "swarm_size must be at least 1"),
            ConfigError::InvalidViewport { width, height } => write!(
                f,
                "viewport dimensions must be finite and positive, got {}x{}",
                width, height
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FlockConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_radii() {
        let config = FlockConfig {
            separation_radius: 30.0,
            detection_radius: 10.0,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RadiusOrder {
                detection: 10.0,
                separation: 30.0,
            })
        );
    }

    #[test]
    fn rejects_negative_weight() {
        let config = FlockConfig {
            cohesion_weight: -0.1,
            ..FlockConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "cohesion_weight",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_radius() {
        let config = FlockConfig {
            separation_radius: f32::NAN,
            ..FlockConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "separation_radius",
                ..
            })
        ));
    }

    #[test]
    fn rejects_empty_swarm() {
        let config = FlockConfig {
            swarm_size: 0,
            ..FlockConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySwarm));
    }

    #[test]
    fn rejects_zero_max_speed() {
        let config = FlockConfig {
            starting_speed: 0.0,
            max_speed: 0.0,
            ..FlockConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "max_speed",
                ..
            })
        ));
    }

    #[test]
    fn rejects_starting_speed_above_max() {
        let config = FlockConfig {
            starting_speed: 8.0,
            max_speed: 4.0,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartingSpeedExceedsMax {
                starting: 8.0,
                max: 4.0,
            })
        );
    }

    #[test]
    fn viewport_rejects_bad_dimensions() {
        assert!(Viewport::new(800.0, 600.0).is_ok());
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::INFINITY, 600.0).is_err());
        assert!(Viewport::new(800.0, f32::NAN).is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = FlockConfig {
            boundary: BoundaryPolicy::Clamp,
            spatial: SpatialStrategy::UniformGrid,
            ..FlockConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: FlockConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: FlockConfig =
            serde_json::from_str(r#"{"swarm_size": 7, "boundary": "clamp"}"#).unwrap();
        assert_eq!(config.swarm_size, 7);
        assert_eq!(config.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.max_speed, FlockConfig::default().max_speed);
    }
}
