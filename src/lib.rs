//! Arena Drive - a sensor-equipped car in a walled 2-D arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, kinematics, sensors, target placement)
//! - `config`: Validated, serializable simulation configuration

pub mod config;
pub mod sim;

pub use config::{ArenaConfig, CarConfig, ConfigError, SensorConfig, SimConfig, SpawnConfig};

use glam::Vec2;

/// Default simulation constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Car footprint (width, length); collision radius is half the length
    pub const CAR_WIDTH: f32 = 20.0;
    pub const CAR_LENGTH: f32 = 40.0;

    /// Speed limits (pixels per tick)
    pub const MAX_DRIVE_SPEED: f32 = 5.0;
    pub const MAX_REVERSE_SPEED: f32 = -3.0;
    /// Speed change per tick at full throttle
    pub const ACCELERATION: f32 = 0.5;
    /// Speed decay per tick
    pub const FRICTION: f32 = 0.05;
    /// Heading change per tick at full steer (degrees)
    pub const ROTATION_SPEED: f32 = 3.0;
    /// Below this speed magnitude steering has no effect
    pub const STEER_DEADBAND: f32 = 0.1;

    /// Sensor fan
    pub const RAY_COUNT_FRONT: usize = 7;
    pub const RAY_COUNT_BACK: usize = 4;
    pub const RAY_LENGTH: f32 = 200.0;
    /// Front arc centered on heading (degrees)
    pub const FRONT_ARC: f32 = 120.0;
    /// Rear arc and its start offset from heading (degrees)
    pub const REAR_ARC: f32 = 200.0;
    pub const REAR_ARC_START: f32 = 80.0;

    /// Target defaults
    pub const TARGET_RADIUS: f32 = 20.0;
    pub const REACH_THRESHOLD: f32 = 25.0;
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const MIN_SEPARATION: f32 = 50.0;
    pub const SPAWN_ATTEMPTS: u32 = 100;
    pub const SPAWN_GRID_STEP: f32 = 10.0;
}

/// Normalize a heading to [0, 360) degrees
#[inline]
pub fn normalize_heading(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees.
///
/// 0° points up (-Y in screen coordinates) and angles increase clockwise,
/// so 90° points along +X.
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Heading (degrees, 0 = up, clockwise) that points along `v`
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    normalize_heading(v.x.atan2(-v.y).to_degrees())
}

/// Signed turn from heading `from` to heading `to`, in (-180, 180] degrees.
/// Positive means clockwise (a right turn).
#[inline]
pub fn heading_delta(from: f32, to: f32) -> f32 {
    let delta = normalize_heading(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_vector_cardinals() {
        let up = heading_vector(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y + 1.0).abs() < 1e-6);

        let right = heading_vector(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        let down = heading_vector(180.0);
        assert!(down.x.abs() < 1e-6 && (down.y - 1.0).abs() < 1e-6);

        let left = heading_vector(270.0);
        assert!((left.x + 1.0).abs() < 1e-6 && left.y.abs() < 1e-6);
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(725.0), 5.0);
        let tiny = normalize_heading(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_heading_of_inverts_heading_vector() {
        for deg in [0.0, 45.0, 90.0, 135.0, 200.0, 315.0] {
            let back = heading_of(heading_vector(deg));
            assert!(heading_delta(deg, back).abs() < 1e-3, "{deg} -> {back}");
        }
    }

    #[test]
    fn test_heading_delta_takes_short_way() {
        assert!((heading_delta(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((heading_delta(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert_eq!(heading_delta(0.0, 180.0), 180.0);
    }
}
