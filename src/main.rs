//! Umbra headless driver
//!
//! Runs a scripted session at a fixed timestep and logs simulation events.
//! Useful for soak-testing the collision core without a renderer attached.
//!
//! Usage: `umbra [seed] [ticks] [levels.json]`

use glam::Vec2;

use umbra::consts::SIM_DT;
use umbra::level::{builtin_levels, load_levels};
use umbra::sim::{SimEvent, SimState, TickInput, tick};

struct Args {
    seed: u64,
    ticks: u64,
    levels_path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse().map_err(|_| format!("bad seed: {s}"))?,
        None => 1,
    };
    let ticks = match args.next() {
        Some(s) => s.parse().map_err(|_| format!("bad tick count: {s}"))?,
        None => 60 * 60,
    };
    Ok(Args {
        seed,
        ticks,
        levels_path: args.next(),
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            log::error!("{message}");
            log::error!("usage: umbra [seed] [ticks] [levels.json]");
            std::process::exit(2);
        }
    };

    let levels = match &args.levels_path {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(err) => {
                    log::error!("cannot read {path}: {err}");
                    std::process::exit(1);
                }
            };
            match load_levels(&json) {
                Ok(levels) => levels,
                Err(err) => {
                    log::error!("cannot parse {path}: {err}");
                    std::process::exit(1);
                }
            }
        }
        None => builtin_levels(),
    };

    log::info!(
        "seed {}, {} ticks, {} levels",
        args.seed,
        args.ticks,
        levels.len()
    );

    let mut state = SimState::new(levels, args.seed);
    for label in &state.level().texts {
        log::info!("[{:>5.1},{:>5.1}] {}", label.pos.x, label.pos.y, label.text);
    }

    // Scripted session: walk right toward the goal, shadow parked off-screen.
    let input = TickInput {
        right: true,
        cursor: Vec2::new(0.0, -50.0),
        ..Default::default()
    };

    let mut completions = 0u64;
    for n in 0..args.ticks {
        for event in tick(&mut state, &input, SIM_DT) {
            let t = n as f32 * SIM_DT;
            match event {
                SimEvent::LevelCompleted { next_level } => {
                    completions += 1;
                    log::info!("t={t:.2}s level completed, now on level {next_level}");
                    for label in &state.level().texts {
                        log::info!(
                            "[{:>5.1},{:>5.1}] {}",
                            label.pos.x,
                            label.pos.y,
                            label.text
                        );
                    }
                }
                SimEvent::PlayerCaught { enemy } => {
                    log::info!("t={t:.2}s caught by enemy {enemy}");
                }
                SimEvent::PlayerFell => log::info!("t={t:.2}s fell out of bounds"),
                SimEvent::EnemyRespawned { enemy } => {
                    log::debug!("t={t:.2}s enemy {enemy} respawned");
                }
            }
        }
    }

    log::info!(
        "done: level {} at t={:.2}s, player at ({:.2}, {:.2}), {completions} completions",
        state.level_index,
        state.level_time,
        state.player.pos.x,
        state.player.pos.y,
    );
}
