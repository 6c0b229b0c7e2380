//! Walls and the arena that owns them
//!
//! The arena is built once per session and shared read-only by the car,
//! the sensors and the target search.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::distance_to_segment;
use crate::config::ArenaConfig;

/// An immutable wall segment (may be zero-length)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }

    /// Distance from a point to this wall
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        distance_to_segment(point, self.start, self.end).0
    }

    /// Zero-length walls never block rays but still collide as points
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Inner walls of the free-roam layout (800x600)
const CLASSIC_WALLS: [[f32; 4]; 10] = [
    [50.0, 50.0, 750.0, 50.0],
    [750.0, 50.0, 750.0, 550.0],
    [750.0, 550.0, 50.0, 550.0],
    [50.0, 550.0, 50.0, 50.0],
    [150.0, 200.0, 300.0, 200.0],
    [500.0, 50.0, 500.0, 150.0],
    [200.0, 300.0, 200.0, 450.0],
    [330.0, 450.0, 480.0, 450.0],
    [600.0, 300.0, 400.0, 300.0],
    [600.0, 200.0, 600.0, 450.0],
];

/// Inner walls of the training layout (800x600, border added separately)
const TRAINING_WALLS: [[f32; 4]; 10] = [
    // Top section
    [150.0, 100.0, 350.0, 100.0],
    [450.0, 100.0, 650.0, 100.0],
    // Upper verticals
    [200.0, 150.0, 200.0, 250.0],
    [600.0, 150.0, 600.0, 250.0],
    // Center bar
    [300.0, 280.0, 500.0, 280.0],
    // Lower verticals
    [200.0, 350.0, 200.0, 450.0],
    [600.0, 350.0, 600.0, 450.0],
    // Bottom section
    [150.0, 500.0, 350.0, 500.0],
    [450.0, 500.0, 650.0, 500.0],
    // Short mid-bottom block
    [380.0, 420.0, 420.0, 420.0],
];

/// Arena extents plus the ordered wall registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    walls: Vec<Wall>,
}

impl Arena {
    pub fn new(width: f32, height: f32, walls: Vec<Wall>) -> Self {
        Self {
            width,
            height,
            walls,
        }
    }

    /// Build from raw `[x1, y1, x2, y2]` rows
    pub fn from_segments(width: f32, height: f32, segments: &[[f32; 4]]) -> Self {
        let walls = segments
            .iter()
            .map(|&[x1, y1, x2, y2]| Wall::new(x1, y1, x2, y2))
            .collect();
        Self::new(width, height, walls)
    }

    /// Four walls along the arena edges
    pub fn open(config: &ArenaConfig) -> Self {
        let mut arena = Self::new(config.width, config.height, Vec::new());
        arena.push_border();
        arena
    }

    /// Free-roam layout: inset border with six interior walls
    pub fn classic() -> Self {
        let config = ArenaConfig::default();
        Self::from_segments(config.width, config.height, &CLASSIC_WALLS)
    }

    /// Training layout: edge border with a symmetric maze of ten walls
    pub fn training() -> Self {
        let mut arena = Self::open(&ArenaConfig::default());
        arena
            .walls
            .extend(TRAINING_WALLS.iter().map(|&[x1, y1, x2, y2]| Wall::new(x1, y1, x2, y2)));
        arena
    }

    fn push_border(&mut self) {
        let (w, h) = (self.width, self.height);
        self.walls.extend([
            Wall::new(0.0, 0.0, w, 0.0),
            Wall::new(w, 0.0, w, h),
            Wall::new(w, h, 0.0, h),
            Wall::new(0.0, h, 0.0, 0.0),
        ]);
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Clearance from a point to the nearest wall (infinite with no walls)
    pub fn min_wall_distance(&self, point: Vec2) -> f32 {
        self.walls
            .iter()
            .map(|wall| wall.distance_to(point))
            .fold(f32::INFINITY, f32::min)
    }

    /// Index of the first wall closer than `radius` to `point`
    pub fn first_wall_within(&self, point: Vec2, radius: f32) -> Option<usize> {
        self.walls
            .iter()
            .position(|wall| wall.distance_to(point) < radius)
    }

    /// Whether a point lies inside the arena rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}
