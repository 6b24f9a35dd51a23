//! # Configuration
//!
//! Compile-time defaults and the JSON-loadable renderer configuration.

use crate::{ArrowfieldError, ArrowfieldResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Path of the sprite drawn for the local player.
pub const SELF_SPRITE_PATH: &str = "./public/images/arrow.jpg";

/// Path of the sprite drawn for every other player.
pub const OTHER_SPRITE_PATH: &str = "./public/images/enemy.jpg";

/// Sprite width and height in pixels
pub const SPRITE_SIZE: u32 = 32;

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1024.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 768.0;

/// Frames per second target for the demo loop
pub const TARGET_FPS: u64 = 60;

/// Sprite sources and footprint used when a renderer is created.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides:
///
/// ```
/// use arrowfield::RendererConfig;
///
/// let config = RendererConfig::from_json_str(r#"{ "sprite_width": 48 }"#).unwrap();
/// assert_eq!(config.sprite_width, 48);
/// assert_eq!(config.sprite_height, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Image drawn by `draw_self`
    pub self_sprite: PathBuf,
    /// Image drawn by `draw_other`
    pub other_sprite: PathBuf,
    /// Sprite width in pixels
    pub sprite_width: u32,
    /// Sprite height in pixels
    pub sprite_height: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            self_sprite: PathBuf::from(SELF_SPRITE_PATH),
            other_sprite: PathBuf::from(OTHER_SPRITE_PATH),
            sprite_width: SPRITE_SIZE,
            sprite_height: SPRITE_SIZE,
        }
    }
}

impl RendererConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> ArrowfieldResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ArrowfieldResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects sprite dimensions that could never be drawn.
    pub fn validate(&self) -> ArrowfieldResult<()> {
        if self.sprite_width == 0 || self.sprite_height == 0 {
            return Err(ArrowfieldError::InvalidConfig(format!(
                "sprite dimensions must be non-zero, got {}x{}",
                self.sprite_width, self.sprite_height
            )));
        }
        Ok(())
    }
}
