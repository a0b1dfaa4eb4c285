//! Blast Runner entry point
//!
//! Headless demo loop: builds the demo level, drives scripted input through
//! the fixed timestep, and logs HUD state once a second. Pass a JSON config
//! path to override the default tuning. RUST_LOG=info for the play-by-play.

use std::time::Instant;

use blast_runner::consts::{MAX_SUBSTEPS, SIM_DT};
use blast_runner::sim::{GameEvent, GamePhase, TickInput, World, tick};
use blast_runner::{Config, level};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json_str(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed);
    let mut world = World::new(config, seed, level::demo_level());
    log::info!("demo run, seed {seed}");

    let mut accumulator = 0.0f32;
    let mut last = Instant::now();

    while world.phase == GamePhase::Playing {
        let now = Instant::now();
        accumulator += now.duration_since(last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = scripted_input(world.tick);
            for event in tick(&mut world, &input) {
                match event {
                    GameEvent::PlayerDied { lives_left } => {
                        log::info!("player died, {lives_left} lives left");
                    }
                    GameEvent::PowerupCollected { tier } => {
                        log::info!("picked up {tier:?}");
                    }
                    GameEvent::BossDefeated => log::info!("boss down"),
                    GameEvent::GameOver { score } => log::info!("game over, score {score}"),
                    GameEvent::GameWon { score } => log::info!("level clear, score {score}"),
                }
            }
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if world.tick % 60 == 0 && world.tick > 0 {
            let snap = world.snapshot();
            log::debug!(
                "tick {} score {} lives {} camera {:.0} entities {}",
                world.tick,
                snap.score,
                snap.lives,
                snap.camera_x,
                snap.sprites.len()
            );
        }

        std::thread::sleep(std::time::Duration::from_secs_f32(SIM_DT / 2.0));
    }

    let snap = world.snapshot();
    log::info!(
        "finished: {:?}, score {}, {} ticks",
        snap.phase,
        snap.score,
        world.tick
    );
    Ok(())
}

/// Canned demo input: run right, fire constantly, hop every two seconds
fn scripted_input(tick: u64) -> TickInput {
    TickInput {
        right: true,
        fire: true,
        jump: tick % 120 < 10,
        ..Default::default()
    }
}
