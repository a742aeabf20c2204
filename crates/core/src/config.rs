//! Session configuration
//!
//! Every tunable of a session lives in [`GameConfig`]. Defaults reproduce the
//! constants in [`blockshot_types`]; a TOML file may override any subset:
//!
//! ```toml
//! policy = "first-fit"
//! grid_width = 10
//! spawn_interval = 30
//! ```
//!
//! The core never reads environment variables; callers load a file (or build
//! the struct) and pass it to [`GameSession::new`](crate::GameSession::new).

use std::path::Path;

use blockshot_types::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest grid edge that still holds every catalog shape
pub const MIN_GRID_CELLS: u16 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub policy: PolicyKind,

    pub screen_width: f32,
    pub screen_height: f32,
    pub cell_size: f32,
    pub grid_width: u16,
    pub grid_height: u16,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_margin: f32,

    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,

    pub fall_speed: f32,
    /// Frames between spawns
    pub spawn_interval: u32,
    /// Peak sideways sway of single-cell pieces, px per frame
    pub drift_amplitude: f32,

    /// Compact columns after line clearing
    pub gravity: bool,
    /// `None` picks the policy's default (uniform rows for nearest-slot)
    pub require_uniform_color: Option<bool>,
    /// Simultaneous target patterns for target-match
    pub target_count: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_margin: PLAYER_MARGIN,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            fall_speed: FALL_SPEED,
            spawn_interval: SPAWN_INTERVAL_FRAMES,
            drift_amplitude: DRIFT_AMPLITUDE,
            gravity: true,
            require_uniform_color: None,
            target_count: 1,
        }
    }
}

impl GameConfig {
    /// Defaults with the given placement policy
    pub fn for_policy(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Whether line clears need a single colour across the row
    pub fn uniform_clears(&self) -> bool {
        self.require_uniform_color
            .unwrap_or_else(|| self.policy.default_uniform_clears())
    }

    /// Usable horizontal range of the player's left edge
    pub fn player_lane(&self) -> (f32, f32) {
        (0.0, (self.screen_width - self.player_width).max(0.0))
    }

    /// Right edge of the grid in world space (never past the screen)
    pub fn play_width(&self) -> f32 {
        (f32::from(self.grid_width) * self.cell_size).min(self.screen_width)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("cell_size", self.cell_size),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("fall_speed", self.fall_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("player_margin", self.player_margin),
            ("drift_amplitude", self.drift_amplitude),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.spawn_interval == 0 {
            return Err(ConfigError::Zero {
                field: "spawn_interval",
            });
        }
        if self.grid_width < MIN_GRID_CELLS || self.grid_height < MIN_GRID_CELLS {
            return Err(ConfigError::GridTooSmall {
                min: MIN_GRID_CELLS,
            });
        }
        if f32::from(self.grid_width) * self.cell_size > self.screen_width
            || f32::from(self.grid_height) * self.cell_size > self.screen_height
        {
            return Err(ConfigError::GridExceedsScreen {
                grid_width: self.grid_width,
                grid_height: self.grid_height,
                screen_width: self.screen_width,
                screen_height: self.screen_height,
            });
        }
        if !(1..=2).contains(&self.target_count) {
            return Err(ConfigError::TargetCount(self.target_count));
        }
        Ok(())
    }
}
