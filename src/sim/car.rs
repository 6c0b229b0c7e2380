//! The car: kinematic state and its per-tick update rule

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::control::ControlInput;
use crate::config::CarConfig;
use crate::{heading_vector, normalize_heading};

/// Outcome of one position update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Motion {
    /// The candidate position was rejected
    pub collided: bool,
    /// First wall (registry index) that rejected the move
    pub hit_wall: Option<usize>,
}

/// Car state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub position: Vec2,
    /// Degrees, 0 = up, clockwise
    pub heading: f32,
    /// Signed speed along the heading (pixels per tick)
    pub speed: f32,
    /// Collision radius
    pub radius: f32,
}

impl Car {
    pub fn new(position: Vec2, heading: f32, radius: f32) -> Self {
        Self {
            position,
            heading: normalize_heading(heading),
            speed: 0.0,
            radius,
        }
    }

    /// Car at rest facing up, sized from the footprint
    pub fn at(position: Vec2, config: &CarConfig) -> Self {
        Self::new(position, 0.0, config.radius())
    }

    /// Unit vector the car is facing
    #[inline]
    pub fn direction(&self) -> Vec2 {
        heading_vector(self.heading)
    }

    /// Steering, throttle and friction for one tick
    pub fn apply_controls(&mut self, input: &ControlInput, config: &CarConfig) {
        let input = input.clamped();

        // Steering flips when reversing; nothing happens near standstill
        if self.speed.abs() > config.steer_deadband {
            let turn = input.steer * config.rotation_speed * self.speed.signum();
            self.heading = normalize_heading(self.heading + turn);
        }

        self.speed = (self.speed + input.throttle * config.acceleration)
            .clamp(config.max_reverse_speed, config.max_drive_speed);

        self.apply_friction(config.friction);
    }

    fn apply_friction(&mut self, friction: f32) {
        if self.speed > 0.0 {
            self.speed = (self.speed - friction).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + friction).min(0.0);
        }
        // Snap instead of creeping toward zero forever
        if self.speed.abs() < friction {
            self.speed = 0.0;
        }
    }

    /// Where the car would be after moving at its current speed
    pub fn candidate_position(&self) -> Vec2 {
        self.position + self.direction() * self.speed
    }

    /// Move along the heading unless the new position is within `radius` of a wall.
    ///
    /// A blocked move leaves the position untouched and stops the car dead.
    pub fn advance(&mut self, arena: &Arena) -> Motion {
        let next = self.candidate_position();

        match arena.first_wall_within(next, self.radius) {
            Some(index) => {
                log::debug!(
                    "Collision with wall {} at ({:.1}, {:.1}), speed {:.2} -> 0",
                    index,
                    next.x,
                    next.y,
                    self.speed
                );
                self.speed = 0.0;
                Motion {
                    collided: true,
                    hit_wall: Some(index),
                }
            }
            None => {
                self.position = next;
                Motion::default()
            }
        }
    }

    /// Full kinematic update: controls, then movement with collision
    pub fn update(&mut self, input: &ControlInput, arena: &Arena, config: &CarConfig) -> Motion {
        self.apply_controls(input, config);
        self.advance(arena)
    }
}
