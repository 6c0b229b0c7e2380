//! Deterministic simulation module
//!
//! All engine logic lives here. This module must be pure and deterministic:
//! - One explicit `tick` per step, no wall-clock time
//! - Seeded RNG only
//! - Walls iterated in registry order, rays in fan order
//! - No rendering or platform dependencies

pub mod arena;
pub mod car;
pub mod control;
pub mod geometry;
pub mod sensors;
pub mod state;
pub mod target;
pub mod tick;

pub use arena::{Arena, Wall};
pub use car::{Car, Motion};
pub use control::{ControlInput, ControlSource, Frame, KeyState, Scripted, SensorPilot};
pub use geometry::{distance_to_segment, segment_intersection};
pub use sensors::{SensorArray, SensorReading, normalized_distances};
pub use state::{CLASSIC_START, Session, TRAINING_START};
pub use target::{
    Placement, Spawn, Target, grid_search, is_target_reached, spawn_bounds, spawn_target,
    spawn_target_with,
};
pub use tick::{TickResult, tick};
