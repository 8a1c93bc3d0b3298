//! Slice Rush entry point
//!
//! Headless runner: drives the simulation with an autopilot standing in for
//! a player, logs the run, and prints the final HUD as JSON. A windowed
//! adapter would replace the autopilot with real input and draw each frame.
//!
//! Usage: `slice-rush [seed] [max_ticks] [--realtime]`

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;

use slice_rush::GameConfig;
use slice_rush::consts::*;
use slice_rush::sim::{EntityKind, GameState, TickInput, tick};

/// How far the autopilot may move the cursor per tick (pixels)
const AUTOPILOT_CURSOR_SPEED: f32 = 12.0;
/// Unsliced clearable entities on screen before the autopilot spends a charge
const AUTOPILOT_SPECIAL_THRESHOLD: usize = 6;
/// One hour of play at the fixed tick rate
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * TICK_RATE as u64;

/// Headless Slice Rush runner
#[derive(Parser, Debug)]
#[command(version, about)]
struct Options {
    /// Seed for the run's random stream
    #[arg(default_value_t = 0x5EED)]
    seed: u64,
    /// Stop after this many ticks if the run has not ended
    #[arg(
        default_value_t = DEFAULT_MAX_TICKS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_ticks: u64,
    /// Pace the loop at the fixed tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,
}

/// Pick inputs the way a reasonable player would: chase the most urgent
/// fruit with the cursor, keep the turret level with it, and fire the
/// special when the screen gets crowded
fn autopilot(state: &GameState) -> TickInput {
    let target = state
        .entities
        .iter()
        .filter(|e| !e.sliced && e.kind != EntityKind::Bomb)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let mut input = TickInput {
        cursor: state.cursor,
        ..Default::default()
    };

    if let Some(target) = target {
        let delta = target.pos - state.cursor;
        input.cursor = state.cursor + delta.clamp_length_max(AUTOPILOT_CURSOR_SPEED);

        let muzzle_y = state.turret.muzzle().y;
        input.axis_y = if target.pos.y > muzzle_y + TURRET_SPEED {
            1
        } else if target.pos.y < muzzle_y - TURRET_SPEED {
            -1
        } else {
            0
        };
    } else {
        // Park near the top centre, away from falling bombs
        let home = Vec2::new(state.config.width / 2.0, state.config.height * 0.25);
        input.cursor =
            state.cursor + (home - state.cursor).clamp_length_max(AUTOPILOT_CURSOR_SPEED);
    }

    // Keep the turret on the left so its rays sweep the whole width
    if state.turret.pos.x > TURRET_SPEED {
        input.axis_x = -1;
    }

    let crowd = state
        .entities
        .iter()
        .filter(|e| !e.sliced && e.kind.special_clearable())
        .count();
    input.cursor_clicked = state.special_charge > 0 && crowd >= AUTOPILOT_SPECIAL_THRESHOLD;

    input
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Slice Rush (headless) starting...");

    let options = Options::parse();
    let mut state =
        GameState::new(GameConfig::default(), options.seed).context("failed to start run")?;

    let started = Instant::now();
    let tick_duration = Duration::from_secs_f64(TICK_DT);
    let mut frame = state.frame();

    for n in 1..=options.max_ticks {
        let now = if options.realtime {
            let deadline = started + tick_duration * u32::try_from(n).unwrap_or(u32::MAX);
            if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
            started.elapsed().as_secs_f64()
        } else {
            n as f64 * TICK_DT
        };

        let input = autopilot(&state);
        frame = tick(&mut state, &input, now);

        if n % u64::from(TICK_RATE * 10) == 0 {
            log::info!(
                "t={:.0}s score={} health={} combo={} special={} fire_rate={:.1} entities={}",
                state.elapsed_time,
                frame.hud.score,
                frame.hud.health,
                frame.hud.combo,
                frame.hud.special_charge,
                frame.hud.fire_rate,
                frame.entity_count()
            );
        }

        if frame.is_game_over() {
            if options.realtime {
                std::thread::sleep(Duration::from_secs_f64(GAME_OVER_LINGER_SECS));
            }
            break;
        }
    }

    if !frame.is_game_over() {
        log::info!("Tick limit reached without game over");
    }

    println!("{}", serde_json::to_string(&frame.hud)?);
    Ok(())
}
