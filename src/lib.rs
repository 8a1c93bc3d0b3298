//! Slice Rush - a falling-fruit slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, scoring)
//! - `config`: Play-area and starting-resource configuration
//!
//! Drawing, fonts and device polling belong to the presentation adapter.
//! The core only consumes a [`sim::TickInput`] per tick and hands back a
//! [`sim::RenderableFrame`].

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{GameState, RenderableFrame, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Nominal duration of one tick in seconds
    pub const TICK_DT: f64 = 1.0 / TICK_RATE as f64;
    /// How long the runner keeps the final frame up after game over
    pub const GAME_OVER_LINGER_SECS: f64 = 2.0;

    /// Default play area
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Health and special charge
    pub const DEFAULT_MAX_HEALTH: u32 = 10;
    pub const DEFAULT_START_HEALTH: u32 = 3;
    pub const MAX_SPECIAL_CHARGE: u8 = 3;

    /// Slice hit-area padding added to an entity's radius
    pub const SLICE_PADDING: f32 = 10.0;
    /// Combo count above which each slice earns a bonus equal to the combo
    pub const COMBO_BONUS_THRESHOLD: u32 = 3;

    /// Spawn geometry: x is drawn from [margin, width - margin]
    pub const SPAWN_MARGIN: i32 = 50;
    pub const SPAWN_Y: f32 = -20.0;
    /// Launch speed scale applied to every spawned entity
    pub const SPEED_MULTIPLIER: f32 = 0.5;
    /// Base gravity (scaled by `SPEED_MULTIPLIER`)
    pub const BASE_GRAVITY: f32 = 0.1;
    /// Score band width for the horizontal drift flip
    pub const DRIFT_BAND: u64 = 1000;

    /// Turret
    pub const TURRET_WIDTH: f32 = 20.0;
    pub const TURRET_HEIGHT: f32 = 60.0;
    pub const TURRET_SPEED: f32 = 5.0;
    pub const TURRET_START_FIRE_RATE: f32 = 1.0;
    pub const TURRET_MAX_FIRE_RATE: f32 = 5.0;
    pub const TURRET_FIRE_RATE_STEP: f32 = 0.5;

    /// Projectile (ray)
    pub const RAY_WIDTH: f32 = 50.0;
    pub const RAY_HEIGHT: f32 = 5.0;
    pub const RAY_SPEED: f32 = 10.0;

    /// Rebound platform
    pub const PLATFORM_WIDTH: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_SPEED: f32 = 5.0;
    /// Distance of the platform's top edge above the bottom of the play area
    pub const PLATFORM_BOTTOM_OFFSET: f32 = 50.0;
    pub const PLATFORM_MAX_BOUNCES: u32 = 10;

    /// Cursor trail capacity
    pub const TRAIL_LENGTH: usize = 10;
}

/// Normalize a directional input to -1, 0 or 1
#[inline]
pub fn axis_sign(value: i8) -> f32 {
    f32::from(value.signum())
}
