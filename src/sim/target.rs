//! Targets: the reach rule and the placement search
//!
//! Placement first tries uniformly random points inside the arena (inset by
//! a margin) and keeps the first one clear of every wall by `min_separation`.
//! If none of the random tries pass, it scans a fixed grid over the same box
//! and returns the point farthest from its nearest wall. That scan always
//! yields a point, even when the best one is still too close.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::config::SpawnConfig;

/// A circular target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub position: Vec2,
    pub radius: f32,
}

impl Target {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Whether the car is close enough to count as reaching the target.
///
/// Uses a fixed threshold, independent of the target's radius.
#[inline]
pub fn is_target_reached(position: Vec2, target: &Target, threshold: f32) -> bool {
    position.distance(target.position) <= threshold
}

/// Which phase of the search produced a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// Random sample accepted on the given (1-based) attempt
    Sampled { attempts: u32 },
    /// Grid scan fallback; `clearance` may be below `min_separation`
    Fallback { clearance: f32 },
}

/// A placed target and how it was found
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub target: Target,
    pub placement: Placement,
}

impl Spawn {
    pub fn used_fallback(&self) -> bool {
        matches!(self.placement, Placement::Fallback { .. })
    }
}

/// Inset box candidates are drawn from: (min corner, max corner)
pub fn spawn_bounds(arena: &Arena, config: &SpawnConfig) -> (Vec2, Vec2) {
    let center = Vec2::new(arena.width, arena.height) / 2.0;
    let lo = Vec2::splat(config.margin);
    let hi = Vec2::new(arena.width - config.margin, arena.height - config.margin);
    // An axis too narrow for the margin collapses onto the arena center
    (lo.min(center), hi.max(center))
}

/// Place a target using a fresh RNG seeded with `seed`
pub fn spawn_target(arena: &Arena, config: &SpawnConfig, seed: u64) -> Spawn {
    let mut rng = Pcg32::seed_from_u64(seed);
    spawn_target_with(arena, config, &mut rng)
}

/// Place a target, drawing random candidates from `rng`
pub fn spawn_target_with<R: Rng>(arena: &Arena, config: &SpawnConfig, rng: &mut R) -> Spawn {
    let (lo, hi) = spawn_bounds(arena, config);

    for attempt in 1..=config.max_attempts {
        let candidate = Vec2::new(rng.random_range(lo.x..=hi.x), rng.random_range(lo.y..=hi.y));
        if arena.min_wall_distance(candidate) >= config.min_separation {
            log::debug!(
                "Target placed at ({:.1}, {:.1}) after {} attempt(s)",
                candidate.x,
                candidate.y,
                attempt
            );
            return Spawn {
                target: Target::new(candidate, config.target_radius),
                placement: Placement::Sampled { attempts: attempt },
            };
        }
    }

    let (best, clearance) = grid_search(arena, lo, hi, config.grid_step);
    log::warn!(
        "No random point within {} attempts cleared {:.1}; grid fallback at ({:.1}, {:.1}) with clearance {:.1}",
        config.max_attempts,
        config.min_separation,
        best.x,
        best.y,
        clearance
    );
    Spawn {
        target: Target::new(best, config.target_radius),
        placement: Placement::Fallback { clearance },
    }
}

/// Number of grid samples along one axis of `[lo, hi]`
fn grid_steps(lo: f32, hi: f32, step: f32) -> u32 {
    ((hi - lo) / step).floor() as u32 + 1
}

/// Arg-max of wall clearance over a grid covering `[lo, hi]`.
///
/// Scans x-major, then y; on ties the first point found is kept.
pub fn grid_search(arena: &Arena, lo: Vec2, hi: Vec2, step: f32) -> (Vec2, f32) {
    let mut best = lo;
    let mut best_clearance = f32::NEG_INFINITY;

    for i in 0..grid_steps(lo.x, hi.x, step) {
        let x = lo.x + i as f32 * step;
        for j in 0..grid_steps(lo.y, hi.y, step) {
            let point = Vec2::new(x, lo.y + j as f32 * step);
            let clearance = arena.min_wall_distance(point);
            if clearance > best_clearance {
                best = point;
                best_clearance = clearance;
            }
        }
    }

    (best, best_clearance)
}
