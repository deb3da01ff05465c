//! Splitshot headless demo runner
//!
//! Runs the simulation without a renderer: two scripted players chase the
//! nearest enemy on their side and hold the trigger. Useful for smoke
//! testing the sim and for generating deterministic replays.
//!
//! Usage: `splitshot [seed] [max_ticks]`

use std::path::PathBuf;

use splitshot::HighScore;
use splitshot::consts::*;
use splitshot::sim::{GameEvent, GamePhase, GameState, PlayerInput, Side, TickInput, tick};

const FIELD_WIDTH: f32 = 800.0;
const FIELD_HEIGHT: f32 = 600.0;

/// Steer toward the nearest same-side enemy, always shooting
fn scripted_input(state: &GameState, side: Side) -> PlayerInput {
    let player = state.player(side);
    let target_x = state
        .enemies
        .iter()
        .filter(|e| state.field.side_of(e.pos.x) == side)
        .min_by(|a, b| {
            let da = (a.pos.x - player.pos.x).abs();
            let db = (b.pos.x - player.pos.x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos.x + ENEMY_WIDTH / 2.0);

    match target_x {
        Some(x) => {
            let center = player.pos.x + PLAYER_WIDTH / 2.0;
            PlayerInput {
                left: x < center - 4.0,
                right: x > center + 4.0,
                shoot: true,
            }
        }
        None => PlayerInput {
            left: false,
            right: false,
            shoot: true,
        },
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(36_000);

    let highscore_path = PathBuf::from(format!("{}.json", HighScore::DEFAULT_KEY));
    let mut highscore = HighScore::load_from(&highscore_path);

    let mut state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, seed);
    state.start();
    log::info!("demo run: seed {seed}, up to {max_ticks} ticks");

    let mut shots = 0u64;
    let mut kills = 0u64;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = TickInput {
            pause: false,
            players: [
                scripted_input(&state, Side::Left),
                scripted_input(&state, Side::Right),
            ],
        };
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::ShotFired { .. } => shots += 1,
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PowerUpCollected { side, kind } => {
                    log::info!("{side:?} picked up {kind:?}")
                }
                GameEvent::EnemyHitPlayer { side, health } => {
                    log::debug!("{side:?} hit, health {health}")
                }
                GameEvent::RoundOver { outcome } => log::info!("round over: {outcome:?}"),
            }
        }
    }

    let left = state.player(Side::Left);
    let right = state.player(Side::Right);
    println!(
        "finished after {} ticks ({} shots, {} kills)",
        state.time_ticks, shots, kills
    );
    println!(
        "left:  score {:>5}  health {:>3}",
        left.score, left.health
    );
    println!(
        "right: score {:>5}  health {:>3}",
        right.score, right.health
    );

    let best_this_run = left.score.max(right.score);
    if highscore.record(best_this_run) {
        if let Err(err) = highscore.save_to(&highscore_path) {
            log::warn!("failed to save high score: {err}");
        } else {
            println!("new high score: {best_this_run}");
        }
    }
}
