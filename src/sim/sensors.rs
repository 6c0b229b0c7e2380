//! Ray-cast distance sensors
//!
//! A fixed fan of rays: `front_count` spread evenly over 120° centered on the
//! heading, then `rear_count` spread over 200° starting 80° clockwise of it.
//! Readings always come back in that order; consumers index them by position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::car::Car;
use super::geometry::segment_intersection;
use crate::config::SensorConfig;
use crate::consts::{FRONT_ARC, REAR_ARC, REAR_ARC_START};
use crate::heading_vector;

/// One ray's result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Ray angle relative to the heading (degrees)
    pub offset: f32,
    /// Distance to the nearest wall, or the ray length when clear
    pub distance: f32,
    /// Nearest hit, or the ray tip when clear
    pub hit_point: Vec2,
}

/// Offsets for `count` rays spread over `span` degrees from `start`.
/// A lone ray sits at `start`.
fn fan(count: usize, start: f32, span: f32) -> impl Iterator<Item = f32> {
    let step = span / count.saturating_sub(1).max(1) as f32;
    (0..count).map(move |i| start + i as f32 * step)
}

/// The configured ray fan
#[derive(Debug, Clone, PartialEq)]
pub struct SensorArray {
    offsets: Vec<f32>,
    front_count: usize,
    ray_length: f32,
}

impl SensorArray {
    pub fn new(config: &SensorConfig) -> Self {
        // A lone front ray looks straight ahead
        let front_start = if config.front_count == 1 {
            0.0
        } else {
            -FRONT_ARC / 2.0
        };
        let offsets = fan(config.front_count, front_start, FRONT_ARC)
            .chain(fan(config.rear_count, REAR_ARC_START, REAR_ARC))
            .collect();
        Self {
            offsets,
            front_count: config.front_count,
            ray_length: config.ray_length,
        }
    }

    /// Ray angles relative to heading, front rays first
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn front_count(&self) -> usize {
        self.front_count
    }

    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// Cast one ray from `origin` toward `heading + offset`
    pub fn cast(&self, arena: &Arena, origin: Vec2, heading: f32, offset: f32) -> SensorReading {
        let tip = origin + heading_vector(heading + offset) * self.ray_length;

        let nearest = arena
            .walls()
            .iter()
            .filter(|wall| !wall.is_degenerate())
            .filter_map(|wall| segment_intersection(origin, tip, wall.start, wall.end))
            .map(|hit| (origin.distance(hit), hit))
            .fold(None, |best: Option<(f32, Vec2)>, candidate| match best {
                Some(b) if b.0 <= candidate.0 => Some(b),
                _ => Some(candidate),
            });

        match nearest {
            Some((distance, hit_point)) => SensorReading {
                offset,
                distance: distance.min(self.ray_length),
                hit_point,
            },
            None => SensorReading {
                offset,
                distance: self.ray_length,
                hit_point: tip,
            },
        }
    }

    /// Scan every ray from the car's pose
    pub fn scan(&self, arena: &Arena, car: &Car) -> Vec<SensorReading> {
        self.offsets
            .iter()
            .map(|&offset| self.cast(arena, car.position, car.heading, offset))
            .collect()
    }
}

/// Readings scaled to [0, 1]: 0 is contact, 1 is clear to full range
pub fn normalized_distances(readings: &[SensorReading], ray_length: f32) -> Vec<f32> {
    readings
        .iter()
        .map(|r| (r.distance / ray_length).clamp(0.0, 1.0))
        .collect()
}
