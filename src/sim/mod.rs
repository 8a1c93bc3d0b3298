//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Constant per-tick motion (never scaled by frame time)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod entity;
pub mod frame;
pub mod spawner;
pub mod state;
pub mod tick;

pub use avatar::{CursorTrail, Projectile, ReboundPlatform, Turret};
pub use collision::{circle_reaches_platform, point_in_circle, ray_hits_circle, reflect_upward};
pub use entity::{Entity, EntityKind, SliceEffect};
pub use frame::{Color, Drawable, Hud, RenderableFrame};
pub use spawner::{bomb_probability, drift_direction, spawn_rate};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
