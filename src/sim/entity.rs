//! Falling entities
//!
//! Every entity shares the same motion and hit-test rules; the kinds differ
//! only in size, points, color and what slicing them triggers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::point_in_circle;
use super::frame::Color;
use crate::consts::SLICE_PADDING;

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Plain fruit, heals one health when sliced
    Fruit,
    /// Refills one special charge
    SpecialFruit,
    /// Ends the run when hit directly
    Bomb,
    /// Huge fruit that raises the rebound platform
    PurpleFruit,
    /// Speeds up the turret
    SpeedBall,
}

/// What slicing an entity does beyond scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceEffect {
    Heal,
    RefillSpecial,
    SpawnPlatform,
    BoostFireRate,
    Detonate,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Fruit,
        EntityKind::SpecialFruit,
        EntityKind::Bomb,
        EntityKind::PurpleFruit,
        EntityKind::SpeedBall,
    ];

    pub fn radius(&self) -> f32 {
        match self {
            EntityKind::Fruit => 20.0,
            EntityKind::SpecialFruit => 25.0,
            EntityKind::Bomb => 20.0,
            EntityKind::PurpleFruit => 75.0, // 3x a special fruit
            EntityKind::SpeedBall => 15.0,
        }
    }

    /// Points awarded on slice; `None` for kinds that don't score
    pub fn points(&self) -> Option<u32> {
        match self {
            EntityKind::Fruit => Some(1),
            EntityKind::SpecialFruit => Some(3),
            EntityKind::Bomb => None,
            EntityKind::PurpleFruit => Some(5),
            EntityKind::SpeedBall => Some(2),
        }
    }

    /// Scoring kinds cost health when they fall off unsliced
    #[inline]
    pub fn is_scoring(&self) -> bool {
        self.points().is_some()
    }

    pub fn slice_effect(&self) -> SliceEffect {
        match self {
            EntityKind::Fruit => SliceEffect::Heal,
            EntityKind::SpecialFruit => SliceEffect::RefillSpecial,
            EntityKind::Bomb => SliceEffect::Detonate,
            EntityKind::PurpleFruit => SliceEffect::SpawnPlatform,
            EntityKind::SpeedBall => SliceEffect::BoostFireRate,
        }
    }

    /// Whether the special action may clear this kind
    pub fn special_clearable(&self) -> bool {
        !matches!(self, EntityKind::SpecialFruit | EntityKind::Bomb)
    }

    pub fn color(&self) -> Color {
        match self {
            EntityKind::Fruit => Color::GREEN,
            EntityKind::SpecialFruit => Color::BLUE,
            EntityKind::Bomb => Color::RED,
            EntityKind::PurpleFruit => Color::PURPLE,
            EntityKind::SpeedBall => Color::ORANGE,
        }
    }
}

/// A falling entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Added to `vel.y` every tick
    pub gravity: f32,
    pub radius: f32,
    pub sliced: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, vel: Vec2, gravity: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            gravity,
            radius: kind.radius(),
            sliced: false,
        }
    }

    /// Advance one tick: position first, then gravity into velocity
    pub fn step_motion(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
    }

    /// Only the bottom edge culls; entities may drift past the sides
    pub fn is_off_screen(&self, height: f32) -> bool {
        self.pos.y > height + self.radius
    }

    /// Proximity slice test with padded hit area
    pub fn check_sliced(&self, point: Vec2) -> bool {
        point_in_circle(point, self.pos, self.radius + SLICE_PADDING)
    }

    /// Mark as sliced. Returns false if it already was.
    pub fn slice(&mut self) -> bool {
        if self.sliced {
            return false;
        }
        self.sliced = true;
        true
    }

    pub fn color(&self) -> Color {
        if self.sliced {
            Color::YELLOW
        } else {
            self.kind.color()
        }
    }
}

/// Slice every unsliced entity matching `hit`, in order
///
/// Returns the kinds that were freshly sliced so the caller can score them.
pub fn slice_matching<F>(entities: &mut [Entity], mut hit: F) -> Vec<EntityKind>
where
    F: FnMut(&Entity) -> bool,
{
    entities
        .iter_mut()
        .filter(|e| !e.sliced && hit(&**e))
        .filter_map(|e| e.slice().then_some(e.kind))
        .collect()
}
