//! Renderable frame handed to the presentation adapter
//!
//! A flat, ordered list of things to draw plus the HUD values. The adapter
//! draws them back-to-front in list order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::state::GamePhase;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const BLUE: Color = Color(0, 0, 255);
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const PURPLE: Color = Color(128, 0, 128);
    pub const ORANGE: Color = Color(255, 165, 0);
}

/// One drawable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Drawable {
    /// Cursor trail polyline, oldest point first
    Trail { points: Vec<Vec2>, color: Color },
    /// Filled circle
    Entity {
        id: u32,
        kind: EntityKind,
        center: Vec2,
        radius: f32,
        color: Color,
        sliced: bool,
    },
    /// Ray; `pos` is the left end on the centre line
    Projectile { pos: Vec2, size: Vec2, color: Color },
    /// Rebound platform; `pos` is the top-left corner
    Platform { pos: Vec2, size: Vec2, color: Color },
    /// Turret; `pos` is the top-left corner
    Turret { pos: Vec2, size: Vec2, color: Color },
    /// Crosshair at the cursor
    Cursor { pos: Vec2, color: Color },
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub health: u32,
    pub combo: u32,
    pub special_charge: u8,
    pub fire_rate: f32,
}

/// Everything the adapter needs to present one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderableFrame {
    pub drawables: Vec<Drawable>,
    pub hud: Hud,
    pub phase: GamePhase,
}

impl RenderableFrame {
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Number of entity circles in the frame
    pub fn entity_count(&self) -> usize {
        self.drawables
            .iter()
            .filter(|d| matches!(d, Drawable::Entity { .. }))
            .count()
    }
}
