//! Simulation configuration
//!
//! Every tunable the engine reads lives here. A `SimConfig` is validated once
//! when a session is built and never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be a non-negative finite number (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("sensor array needs at least one ray")]
    NoRays,
    #[error("speed limits invalid: reverse {reverse} must be <= 0 <= drive {drive}")]
    SpeedLimits { reverse: f32, drive: f32 },
    #[error("spawn margin {margin} leaves no room inside a {width}x{height} arena")]
    EmptySpawnArea { margin: f32, width: f32, height: f32 },
    #[error("arena is {arena_width}x{arena_height} but the config describes {config_width}x{config_height}")]
    ArenaMismatch {
        arena_width: f32,
        arena_height: f32,
        config_width: f32,
        config_height: f32,
    },
    #[error("spawn search needs at least one random attempt")]
    ZeroAttempts,
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The inset spawn box must keep a non-negative extent on both axes
pub(crate) fn check_spawn_room(margin: f32, width: f32, height: f32) -> Result<(), ConfigError> {
    if margin * 2.0 > width || margin * 2.0 > height {
        return Err(ConfigError::EmptySpawnArea {
            margin,
            width,
            height,
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Arena extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Vehicle footprint and handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Footprint width (visual only)
    pub width: f32,
    /// Footprint length; collision radius is half of it
    pub length: f32,
    pub max_drive_speed: f32,
    /// Most negative speed allowed (<= 0)
    pub max_reverse_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
    /// Degrees per tick at full steer
    pub rotation_speed: f32,
    pub steer_deadband: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            width: CAR_WIDTH,
            length: CAR_LENGTH,
            max_drive_speed: MAX_DRIVE_SPEED,
            max_reverse_speed: MAX_REVERSE_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            rotation_speed: ROTATION_SPEED,
            steer_deadband: STEER_DEADBAND,
        }
    }
}

impl CarConfig {
    /// Collision radius derived from the footprint
    #[inline]
    pub fn radius(&self) -> f32 {
        self.length / 2.0
    }
}

/// Ray fan layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub front_count: usize,
    pub rear_count: usize,
    pub ray_length: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            front_count: RAY_COUNT_FRONT,
            rear_count: RAY_COUNT_BACK,
            ray_length: RAY_LENGTH,
        }
    }
}

impl SensorConfig {
    /// Total number of readings per scan
    pub fn ray_count(&self) -> usize {
        self.front_count + self.rear_count
    }
}

/// Target size, reach rule and placement search parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub target_radius: f32,
    pub reach_threshold: f32,
    /// Inset from each arena edge for candidate points
    pub margin: f32,
    /// Required clearance between a target and every wall
    pub min_separation: f32,
    /// Random samples before falling back to the grid scan
    pub max_attempts: u32,
    pub grid_step: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            target_radius: TARGET_RADIUS,
            reach_threshold: REACH_THRESHOLD,
            margin: SPAWN_MARGIN,
            min_separation: MIN_SEPARATION,
            max_attempts: SPAWN_ATTEMPTS,
            grid_step: SPAWN_GRID_STEP,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub arena: ArenaConfig,
    pub car: CarConfig,
    pub sensors: SensorConfig,
    pub spawn: SpawnConfig,
}

impl SimConfig {
    /// Parse a JSON document (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaConfig { width, height } = self.arena;
        positive("arena.width", width)?;
        positive("arena.height", height)?;

        let car = &self.car;
        non_negative("car.width", car.width)?;
        positive("car.length", car.length)?;
        non_negative("car.acceleration", car.acceleration)?;
        non_negative("car.friction", car.friction)?;
        non_negative("car.rotation_speed", car.rotation_speed)?;
        non_negative("car.steer_deadband", car.steer_deadband)?;
        let limits_ok = car.max_reverse_speed.is_finite()
            && car.max_drive_speed.is_finite()
            && car.max_reverse_speed <= 0.0
            && car.max_drive_speed >= 0.0;
        if !limits_ok {
            return Err(ConfigError::SpeedLimits {
                reverse: car.max_reverse_speed,
                drive: car.max_drive_speed,
            });
        }

        if self.sensors.ray_count() == 0 {
            return Err(ConfigError::NoRays);
        }
        positive("sensors.ray_length", self.sensors.ray_length)?;

        let spawn = &self.spawn;
        non_negative("spawn.target_radius", spawn.target_radius)?;
        non_negative("spawn.reach_threshold", spawn.reach_threshold)?;
        non_negative("spawn.margin", spawn.margin)?;
        non_negative("spawn.min_separation", spawn.min_separation)?;
        positive("spawn.grid_step", spawn.grid_step)?;
        if spawn.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        check_spawn_room(spawn.margin, width, height)
    }
}
