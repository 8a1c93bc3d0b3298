//! Player-controlled avatars
//!
//! The cursor slices by proximity, the turret autofires rays to the right,
//! and the rebound platform (when raised) bounces falling entities back up.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Auto-firing turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Shots per second
    pub fire_rate: f32,
    /// Clock time (seconds) of the last shot
    pub last_shot_time: f64,
}

impl Turret {
    /// Turret centred in the play area
    pub fn new(bounds: Vec2) -> Self {
        let size = Vec2::new(TURRET_WIDTH, TURRET_HEIGHT);
        Self {
            pos: ((bounds - size) / 2.0).floor(),
            size,
            speed: TURRET_SPEED,
            fire_rate: TURRET_START_FIRE_RATE,
            last_shot_time: 0.0,
        }
    }

    /// Move by one step along each axis (-1, 0 or 1), clamped to the play area
    pub fn move_by(&mut self, dx: f32, dy: f32, bounds: Vec2) {
        let max = (bounds - self.size).max(Vec2::ZERO);
        self.pos = (self.pos + Vec2::new(dx, dy) * self.speed).clamp(Vec2::ZERO, max);
    }

    /// Seconds between shots at the current fire rate
    pub fn cooldown(&self) -> f64 {
        1.0 / f64::from(self.fire_rate)
    }

    /// Fire if the cooldown has elapsed
    pub fn try_fire(&mut self, now: f64) -> Option<Projectile> {
        if now - self.last_shot_time >= self.cooldown() {
            self.last_shot_time = now;
            Some(Projectile::new(self.muzzle()))
        } else {
            None
        }
    }

    /// Where rays spawn: the turret centre, snapped to whole pixels
    pub fn muzzle(&self) -> Vec2 {
        self.pos + (self.size / 2.0).floor()
    }

    pub fn boost_fire_rate(&mut self) {
        self.fire_rate = (self.fire_rate + TURRET_FIRE_RATE_STEP).min(TURRET_MAX_FIRE_RATE);
    }
}

/// A ray fired by the turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Left end of the ray, vertically centred
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            width: RAY_WIDTH,
            height: RAY_HEIGHT,
            speed: RAY_SPEED,
        }
    }

    pub fn step_motion(&mut self) {
        self.pos.x += self.speed;
    }

    /// Rays only travel right, so only the right edge culls
    pub fn is_off_screen(&self, width: f32) -> bool {
        self.pos.x > width
    }
}

/// Temporary platform that bounces falling entities back upward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReboundPlatform {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub bounces: u32,
}

impl ReboundPlatform {
    /// Platform centred horizontally near the bottom of the play area
    pub fn new(bounds: Vec2) -> Self {
        let size = Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT);
        Self {
            pos: Vec2::new(
                (bounds.x / 2.0).floor() - (size.x / 2.0).floor(),
                bounds.y - PLATFORM_BOTTOM_OFFSET,
            ),
            size,
            speed: PLATFORM_SPEED,
            bounces: 0,
        }
    }

    /// Slide horizontally, clamped to the play area
    pub fn move_by(&mut self, dx: f32, width: f32) {
        let max_x = (width - self.size.x).max(0.0);
        self.pos.x = (self.pos.x + dx * self.speed).clamp(0.0, max_x);
    }

    /// Count a bounce. Returns true once the platform is worn out.
    pub fn register_bounce(&mut self) -> bool {
        self.bounces += 1;
        self.bounces >= PLATFORM_MAX_BOUNCES
    }
}

/// Recent cursor positions, oldest first (render-only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorTrail {
    points: VecDeque<Vec2>,
}

impl CursorTrail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Record a position, dropping the oldest beyond capacity
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > TRAIL_LENGTH {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }
}
