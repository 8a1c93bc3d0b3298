//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation one frame in a fixed order:
//! special action, avatars, turret fire, cursor slicing, spawn roll, entity
//! physics, projectile physics. Motion is constant per tick; the clock only
//! feeds the turret cooldown and `elapsed_time`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_reaches_platform, ray_hits_circle, reflect_upward};
use super::entity::slice_matching;
use super::frame::RenderableFrame;
use super::spawner;
use super::state::{GamePhase, GameState};
use crate::axis_sign;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Cursor position in play-area pixels
    pub cursor: Vec2,
    /// Slice gesture (click) this tick; triggers the special action
    pub cursor_clicked: bool,
    /// Horizontal direction: -1 left, 1 right
    pub axis_x: i8,
    /// Vertical direction: -1 up, 1 down
    pub axis_y: i8,
}

impl TickInput {
    /// Directional axes normalized to -1, 0 or 1
    pub fn axes(&self) -> (f32, f32) {
        (axis_sign(self.axis_x), axis_sign(self.axis_y))
    }
}

/// Advance the game state by one tick and return what to draw
///
/// `now` is monotonic clock time in seconds since the run started.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> RenderableFrame {
    // Frozen once the run is over
    if state.phase == GamePhase::GameOver {
        return state.frame();
    }

    // Spawn odds follow the score as it stood when the tick began
    let rate_score = state.score;

    state.time_ticks += 1;
    state.elapsed_time = now;
    state.cursor = input.cursor;
    state.trail.push(input.cursor);

    if input.cursor_clicked {
        state.use_special();
    }

    move_avatars(state, input);
    fire_turret(state, now);
    slice_at_cursor(state);
    roll_spawn(state, rate_score);
    advance_entities(state);
    advance_projectiles(state);

    if state.is_game_over() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks ({:.1}s): score {}",
            state.time_ticks,
            state.elapsed_time,
            state.score
        );
    }

    state.frame()
}

/// Turret moves on both axes; the platform follows the horizontal axis
fn move_avatars(state: &mut GameState, input: &TickInput) {
    let (dx, dy) = input.axes();
    let bounds = state.bounds();

    state.turret.move_by(dx, dy, bounds);
    if let Some(platform) = state.platform.as_mut() {
        platform.move_by(dx, bounds.x);
    }
}

fn fire_turret(state: &mut GameState, now: f64) {
    if let Some(ray) = state.turret.try_fire(now) {
        log::trace!("Ray fired at {:?}", ray.pos);
        state.projectiles.push(ray);
    }
}

fn slice_at_cursor(state: &mut GameState) {
    let cursor = state.cursor;
    let sliced = slice_matching(&mut state.entities, |e| e.check_sliced(cursor));
    for kind in sliced {
        state.apply_slice(kind);
    }
}

fn roll_spawn(state: &mut GameState, rate_score: u64) {
    if !spawner::roll_spawn(&mut state.rng, rate_score) {
        return;
    }
    let id = state.next_entity_id();
    state.drift_direction = spawner::drift_direction(state.score);
    let entity = spawner::spawn_entity(&mut state.rng, id, state.score, state.config.width);
    state.entities.push(entity);
}

/// Move entities, cull those past the bottom, and bounce off the platform
pub(crate) fn advance_entities(state: &mut GameState) {
    let height = state.config.height;
    let platform = &mut state.platform;
    let mut misses = 0u32;

    state.entities.retain_mut(|entity| {
        entity.step_motion();

        if entity.is_off_screen(height) {
            if !entity.sliced && entity.kind.is_scoring() {
                misses += 1;
            }
            return false;
        }

        if let Some(p) = platform.as_mut() {
            if !entity.sliced && circle_reaches_platform(entity.pos, entity.radius, p.pos, p.size.x)
            {
                entity.vel = reflect_upward(entity.vel);
                if p.register_bounce() {
                    log::info!("Rebound platform worn out");
                    *platform = None;
                }
            }
        }

        true
    });

    for _ in 0..misses {
        state.register_miss();
    }
}

/// Move rays, cull those past the right edge, and slice what they cover
///
/// Rays are not consumed by hits and may slice several entities.
pub(crate) fn advance_projectiles(state: &mut GameState) {
    let width = state.config.width;
    let entities = &mut state.entities;
    let mut sliced = Vec::new();

    state.projectiles.retain_mut(|ray| {
        ray.step_motion();
        if ray.is_off_screen(width) {
            return false;
        }
        sliced.extend(slice_matching(entities.as_mut_slice(), |e| {
            ray_hits_circle(ray.pos, ray.width, e.pos, e.radius)
        }));
        true
    });

    for kind in sliced {
        state.apply_slice(kind);
    }
}
