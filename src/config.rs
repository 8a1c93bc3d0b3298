//! Game configuration
//!
//! Play-area size and starting resources. Validated once when a run starts;
//! a running simulation never sees an invalid configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected at initialization
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("play area {width}x{height} must be finite and positive")]
    InvalidPlayArea { width: f32, height: f32 },
    #[error("play area {width}x{height} is too small (need at least {min_width}x{min_height})")]
    PlayAreaTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },
    #[error("max health must be at least 1")]
    ZeroMaxHealth,
    #[error("starting health {health} must be within 1..={max_health}")]
    StartHealthOutOfRange { health: u32, max_health: u32 },
    #[error(
        "starting special charge {charge} exceeds the cap of {}",
        MAX_SPECIAL_CHARGE
    )]
    SpecialChargeOutOfRange { charge: u8 },
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Play area width in pixels
    pub width: f32,
    /// Play area height in pixels
    pub height: f32,
    /// Health ceiling
    pub max_health: u32,
    /// Health at the start of a run
    pub start_health: u32,
    /// Special charges at the start of a run
    pub start_special: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_health: DEFAULT_MAX_HEALTH,
            start_health: DEFAULT_START_HEALTH,
            start_special: MAX_SPECIAL_CHARGE,
        }
    }
}

impl GameConfig {
    /// Default configuration with a custom play area
    pub fn with_play_area(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Smallest play area that still fits the spawn strip, the turret and
    /// the rebound platform
    pub fn min_play_area() -> (f32, f32) {
        let min_width = (2 * SPAWN_MARGIN) as f32 + 1.0;
        let min_width = min_width.max(PLATFORM_WIDTH).max(TURRET_WIDTH);
        let min_height = (PLATFORM_BOTTOM_OFFSET + PLATFORM_HEIGHT).max(TURRET_HEIGHT);
        (min_width, min_height)
    }

    /// Check preconditions for starting a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidPlayArea { width, height });
        }

        let (min_width, min_height) = Self::min_play_area();
        if width < min_width || height < min_height {
            return Err(ConfigError::PlayAreaTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }

        if self.max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth);
        }
        if self.start_health == 0 || self.start_health > self.max_health {
            return Err(ConfigError::StartHealthOutOfRange {
                health: self.start_health,
                max_health: self.max_health,
            });
        }
        if self.start_special > MAX_SPECIAL_CHARGE {
            return Err(ConfigError::SpecialChargeOutOfRange {
                charge: self.start_special,
            });
        }

        Ok(())
    }
}
