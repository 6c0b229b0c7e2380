//! Session state
//!
//! Everything one simulation run owns: the validated config, the arena, the
//! sensor fan, the car, the current target and the seeded placement RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::car::Car;
use super::control::{ControlInput, ControlSource, Frame};
use super::sensors::{SensorArray, SensorReading};
use super::target::{Placement, Target, is_target_reached, spawn_target_with};
use super::tick::{TickResult, tick};
use crate::config::{ConfigError, SimConfig, check_spawn_room};

/// Car start used by the preset sessions
pub const TRAINING_START: Vec2 = Vec2::new(100.0, 300.0);
pub const CLASSIC_START: Vec2 = Vec2::new(300.0, 300.0);

/// A single simulation run
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) config: SimConfig,
    pub(super) arena: Arena,
    sensors: SensorArray,
    rng: Pcg32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub car: Car,
    pub target: Target,
    /// How the current target was placed
    pub placement: Placement,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks on which a move was rejected
    pub collisions: u64,
    /// Targets placed so far, including the first
    pub targets_spawned: u64,
}

impl Session {
    /// Start a session with the car at rest at `start`, facing up
    pub fn new(config: SimConfig, arena: Arena, start: Vec2, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(arena.width.is_finite() && arena.width > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "arena.width",
                value: arena.width,
            });
        }
        if !(arena.height.is_finite() && arena.height > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "arena.height",
                value: arena.height,
            });
        }

        check_spawn_room(config.spawn.margin, arena.width, arena.height)?;
        if arena.width != config.arena.width || arena.height != config.arena.height {
            return Err(ConfigError::ArenaMismatch {
                arena_width: arena.width,
                arena_height: arena.height,
                config_width: config.arena.width,
                config_height: config.arena.height,
            });
        }

        if !arena.contains(start) {
            log::warn!(
                "Car starts outside the {}x{} arena at ({:.1}, {:.1})",
                arena.width,
                arena.height,
                start.x,
                start.y
            );
        }
        let car = Car::at(start, &config.car);
        if let Some(index) = arena.first_wall_within(start, car.radius) {
            log::warn!(
                "Car starts within its radius of wall {} at ({:.1}, {:.1}); it cannot move until it turns away",
                index,
                start.x,
                start.y
            );
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn = spawn_target_with(&arena, &config.spawn, &mut rng);
        log::info!(
            "Session started with seed {}: {} walls, {} rays, first target at ({:.1}, {:.1})",
            seed,
            arena.walls().len(),
            config.sensors.ray_count(),
            spawn.target.position.x,
            spawn.target.position.y
        );

        Ok(Self {
            sensors: SensorArray::new(&config.sensors),
            config,
            arena,
            rng,
            seed,
            car,
            target: spawn.target,
            placement: spawn.placement,
            time_ticks: 0,
            collisions: 0,
            targets_spawned: 1,
        })
    }

    /// Default config, training layout, car at the left entrance
    pub fn training(seed: u64) -> Result<Self, ConfigError> {
        Self::new(SimConfig::default(), Arena::training(), TRAINING_START, seed)
    }

    /// Default config, free-roam layout
    pub fn classic(seed: u64) -> Result<Self, ConfigError> {
        Self::new(SimConfig::default(), Arena::classic(), CLASSIC_START, seed)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn sensor_array(&self) -> &SensorArray {
        &self.sensors
    }

    /// Advance one tick with the given input
    pub fn tick(&mut self, input: &ControlInput) -> TickResult {
        tick(self, input)
    }

    /// Current sensor readings, front rays then rear rays
    pub fn sense(&self) -> Vec<SensorReading> {
        self.sensors.scan(&self.arena, &self.car)
    }

    /// Sense, let `source` pick an input, then tick
    pub fn step_with<S: ControlSource + ?Sized>(&mut self, source: &mut S) -> TickResult {
        let readings = self.sense();
        let input = source.next_input(&Frame {
            car: &self.car,
            sensors: &readings,
            target: &self.target,
            ray_length: self.sensors.ray_length(),
        });
        self.tick(&input)
    }

    /// Whether the car currently counts as having reached the target
    pub fn target_reached(&self) -> bool {
        is_target_reached(
            self.car.position,
            &self.target,
            self.config.spawn.reach_threshold,
        )
    }

    /// Discard the current target and place a new one
    pub fn respawn_target(&mut self) -> &Target {
        let spawn = spawn_target_with(&self.arena, &self.config.spawn, &mut self.rng);
        self.target = spawn.target;
        self.placement = spawn.placement;
        self.targets_spawned += 1;
        log::info!(
            "Target #{} at ({:.1}, {:.1})",
            self.targets_spawned,
            self.target.position.x,
            self.target.position.y
        );
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::control::{KeyState, Scripted, SensorPilot};

    #[test]
    fn test_new_session() {
        let session = Session::training(12345).unwrap();
        assert_eq!(session.car.position, TRAINING_START);
        assert_eq!(session.car.speed, 0.0);
        assert_eq!(session.time_ticks, 0);
        assert_eq!(session.targets_spawned, 1);
        assert_eq!(session.sense().len(), session.config().sensors.ray_count());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.sensors.front_count = 0;
        config.sensors.rear_count = 0;
        assert!(matches!(
            Session::new(config, Arena::training(), TRAINING_START, 1),
            Err(ConfigError::NoRays)
        ));

        let arena = Arena::new(0.0, 600.0, Vec::new());
        assert!(Session::new(SimConfig::default(), arena, TRAINING_START, 1).is_err());
    }

    #[test]
    fn test_arena_too_small_for_margin_rejected() {
        let arena = Arena::new(60.0, 60.0, Vec::new());
        assert!(matches!(
            Session::new(SimConfig::default(), arena, Vec2::new(30.0, 30.0), 1),
            Err(ConfigError::EmptySpawnArea { .. })
        ));

        // Same arena with a margin that fits: every target stays inset
        let mut config = SimConfig::default();
        config.arena.width = 60.0;
        config.arena.height = 60.0;
        config.spawn.margin = 20.0;
        let arena = Arena::new(60.0, 60.0, Vec::new());
        let mut session = Session::new(config, arena, Vec2::new(30.0, 30.0), 1).unwrap();
        for _ in 0..20 {
            let p = session.respawn_target().position;
            assert!((20.0..=40.0).contains(&p.x) && (20.0..=40.0).contains(&p.y), "{p}");
        }
    }

    #[test]
    fn test_config_must_describe_the_arena() {
        let mut config = SimConfig::default();
        config.arena.width = 2000.0;
        assert!(matches!(
            Session::new(config, Arena::classic(), CLASSIC_START, 1),
            Err(ConfigError::ArenaMismatch { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_targets() {
        let mut a = Session::training(777).unwrap();
        let mut b = Session::training(777).unwrap();
        assert_eq!(a.target, b.target);
        for _ in 0..5 {
            assert_eq!(a.respawn_target(), b.respawn_target());
        }
        assert_eq!(a.targets_spawned, 6);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::classic(99999).unwrap();
        let mut b = Session::classic(99999).unwrap();

        let mut pilot_a = SensorPilot::default();
        let mut pilot_b = SensorPilot::default();
        for _ in 0..300 {
            let ra = a.step_with(&mut pilot_a);
            let rb = b.step_with(&mut pilot_b);
            assert_eq!(ra, rb);
            if ra.reached {
                a.respawn_target();
                b.respawn_target();
            }
        }
        assert_eq!(a.car, b.car);
        assert_eq!(a.target, b.target);
        assert_eq!(a.time_ticks, 300);
    }

    #[test]
    fn test_step_with_keys_and_script() {
        let mut session = Session::training(3).unwrap();
        let mut keys = KeyState {
            forward: true,
            ..Default::default()
        };
        let result = session.step_with(&mut keys);
        assert!(result.speed > 0.0);

        let mut script = Scripted::new(vec![ControlInput::new(-1.0, 0.0); 3]);
        for _ in 0..3 {
            session.step_with(&mut script);
        }
        assert!(session.car.speed < 0.0);
    }

    #[test]
    fn test_external_policy_sees_sensors() {
        let mut session = Session::training(3).unwrap();
        let expected = session.sense();
        let mut seen = Vec::new();
        let mut policy = |frame: &Frame<'_>| {
            seen = frame.sensors.to_vec();
            ControlInput::default()
        };
        session.step_with(&mut policy);
        assert_eq!(seen, expected);
    }
}
