//! Arena Drive headless driver
//!
//! Runs one session under the sensor autopilot and logs what happens.
//!
//! Usage: `arena-drive [config.json] [--seed N] [--ticks N] [--layout open|classic|training]`
//! Set `RUST_LOG=debug` to see collisions and placements.

use std::process::ExitCode;

use arena_drive::SimConfig;
use arena_drive::sim::{Arena, CLASSIC_START, SensorPilot, Session, TRAINING_START};
use glam::Vec2;

#[derive(Debug)]
struct Options {
    config_path: Option<String>,
    seed: u64,
    ticks: u64,
    layout: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: None,
            seed: 12345,
            ticks: 5_000,
            layout: "training".to_string(),
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = value.parse().map_err(|e| format!("bad seed {value:?}: {e}"))?;
            }
            "--ticks" => {
                let value = args.next().ok_or("--ticks needs a value")?;
                options.ticks = value
                    .parse()
                    .map_err(|e| format!("bad tick count {value:?}: {e}"))?;
            }
            "--layout" => {
                options.layout = args.next().ok_or("--layout needs a value")?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            path => options.config_path = Some(path.to_string()),
        }
    }
    Ok(options)
}

fn build_session(options: &Options) -> Result<Session, String> {
    let config = match &options.config_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            SimConfig::from_json(&json).map_err(|e| format!("{path}: {e}"))?
        }
        None => SimConfig::default(),
    };

    let (arena, start) = match options.layout.as_str() {
        "open" => {
            let start = Vec2::new(config.arena.width / 2.0, config.arena.height / 2.0);
            (Arena::open(&config.arena), start)
        }
        "classic" => (Arena::classic(), CLASSIC_START),
        "training" => (Arena::training(), TRAINING_START),
        other => return Err(format!("unknown layout {other:?}")),
    };

    Session::new(config, arena, start, options.seed).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Arena Drive (headless) starting...");

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut session = match build_session(&options) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not start session: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut pilot = SensorPilot::default();
    let mut reached = 0u64;
    for _ in 0..options.ticks {
        let result = session.step_with(&mut pilot);
        if result.reached {
            reached += 1;
            log::info!(
                "Reached target {} at tick {}",
                session.targets_spawned,
                session.time_ticks
            );
            session.respawn_target();
        }
    }

    log::info!(
        "Done: {} ticks on {:?} layout, {} targets reached, {} collisions, car at ({:.1}, {:.1})",
        session.time_ticks,
        options.layout,
        reached,
        session.collisions,
        session.car.position.x,
        session.car.position.y
    );
    println!(
        "ticks={} reached={} collisions={}",
        session.time_ticks, reached, session.collisions
    );
    ExitCode::SUCCESS
}
