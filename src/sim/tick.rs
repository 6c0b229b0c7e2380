//! Per-tick update
//!
//! One call advances the car under the given control input, resolves wall
//! collisions and evaluates the reach rule. The caller owns timing; the
//! engine has no notion of frame rate.

use glam::Vec2;

use super::control::ControlInput;
use super::state::Session;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    pub position: Vec2,
    pub heading: f32,
    pub speed: f32,
    /// The move was rejected by a wall and the car stopped
    pub collided: bool,
    /// Registry index of the wall that stopped the car
    pub hit_wall: Option<usize>,
    /// The car is within reach of the current target after moving
    pub reached: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut Session, input: &ControlInput) -> TickResult {
    state.time_ticks += 1;

    let motion = state
        .car
        .update(input, &state.arena, &state.config.car);
    if motion.collided {
        state.collisions += 1;
    }

    let reached = state.target_reached();
    if reached {
        log::debug!(
            "Target reached at tick {} ({:.1}, {:.1})",
            state.time_ticks,
            state.car.position.x,
            state.car.position.y
        );
    }

    TickResult {
        position: state.car.position,
        heading: state.car.heading,
        speed: state.car.speed,
        collided: motion.collided,
        hit_wall: motion.hit_wall,
        reached,
    }
}
