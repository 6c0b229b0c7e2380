//! Control inputs and the sources that produce them
//!
//! Whatever drives the car (held keys, a recorded script, an autopilot or an
//! external policy) is a `ControlSource`. The session asks it for one
//! `ControlInput` per tick; there is no separate manual-driving path.

use serde::{Deserialize, Serialize};

use super::car::Car;
use super::sensors::SensorReading;
use super::target::Target;
use crate::{heading_delta, heading_of};

/// Control for a single tick (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlInput {
    /// -1 = full reverse, 1 = full drive
    pub throttle: f32,
    /// -1 = full left, 1 = full right
    pub steer: f32,
}

impl ControlInput {
    pub fn new(throttle: f32, steer: f32) -> Self {
        Self { throttle, steer }
    }

    /// Both axes clamped to [-1, 1], NaN read as 0
    pub fn clamped(&self) -> Self {
        fn axis(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
        }
        Self {
            throttle: axis(self.throttle),
            steer: axis(self.steer),
        }
    }
}

/// Held drive keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyState {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

impl From<KeyState> for ControlInput {
    fn from(keys: KeyState) -> Self {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Self {
            throttle: axis(keys.reverse, keys.forward),
            steer: axis(keys.left, keys.right),
        }
    }
}

/// What a control source gets to look at before choosing an input
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub car: &'a Car,
    pub sensors: &'a [SensorReading],
    pub target: &'a Target,
    pub ray_length: f32,
}

/// Anything that can produce a control input each tick
pub trait ControlSource {
    fn next_input(&mut self, frame: &Frame<'_>) -> ControlInput;
}

impl ControlSource for KeyState {
    fn next_input(&mut self, _frame: &Frame<'_>) -> ControlInput {
        ControlInput::from(*self)
    }
}

/// External policies plug in as plain closures
impl<F> ControlSource for F
where
    F: FnMut(&Frame<'_>) -> ControlInput,
{
    fn next_input(&mut self, frame: &Frame<'_>) -> ControlInput {
        self(frame)
    }
}

/// Replays a fixed list of inputs, then coasts
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    inputs: Vec<ControlInput>,
    cursor: usize,
}

impl Scripted {
    pub fn new(inputs: Vec<ControlInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.inputs.len()
    }
}

impl ControlSource for Scripted {
    fn next_input(&mut self, _frame: &Frame<'_>) -> ControlInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor = (self.cursor + 1).min(self.inputs.len());
        input
    }
}

/// Reactive autopilot: homes on the target and steers away from close walls.
///
/// Each front ray votes to turn away from its side in proportion to how
/// blocked it is (a one-layer perceptron over the inverted readings).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPilot {
    /// Weight of wall avoidance against target homing
    pub avoid_gain: f32,
    /// Bearing error (degrees) that saturates the homing steer
    pub homing_span: f32,
    /// Normalized clearance straight ahead below which the pilot backs off
    pub brake_clearance: f32,
    /// Rays within this many degrees of the heading count as "ahead"
    pub ahead_cone: f32,
}

impl Default for SensorPilot {
    fn default() -> Self {
        Self {
            avoid_gain: 0.8,
            homing_span: 45.0,
            brake_clearance: 0.2,
            ahead_cone: 25.0,
        }
    }
}

impl ControlSource for SensorPilot {
    fn next_input(&mut self, frame: &Frame<'_>) -> ControlInput {
        let car = frame.car;
        let to_target = frame.target.position - car.position;

        let homing = if to_target.length_squared() > 0.0 {
            let bearing = heading_delta(car.heading, heading_of(to_target));
            (bearing / self.homing_span).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        let mut avoid = 0.0;
        let mut ahead_clearance: f32 = 1.0;
        for reading in frame.sensors {
            let side = heading_delta(0.0, reading.offset);
            if side.abs() > 90.0 {
                continue;
            }
            let blocked = 1.0 - reading.distance / frame.ray_length;
            // Left rays (negative side) push right, right rays push left
            avoid -= blocked * (side / 90.0);
            if side.abs() <= self.ahead_cone {
                ahead_clearance = ahead_clearance.min(reading.distance / frame.ray_length);
            }
        }

        let throttle = if ahead_clearance < self.brake_clearance {
            -0.5
        } else {
            ahead_clearance.min(1.0)
        };
        // Steering inverts in reverse, so flip the request to keep turning away
        let steer = (homing + avoid * self.avoid_gain).clamp(-1.0, 1.0);
        let steer = if car.speed < 0.0 { -steer } else { steer };

        ControlInput::new(throttle, steer)
    }
}
