//! # Arrowfield
//!
//! Sprite rendering for a top-down arrow arena.
//!
//! ## Architecture Overview
//!
//! The crate is deliberately small. A [`Renderer`] is bound to a drawing
//! [`Surface`] and owns two [`Sprite`]s: one for the local player and one
//! for every other player. Each frame the caller clears the surface and
//! draws each player at a position and orientation.
//!
//! - **Surface**: canvas-style drawing context (clear, save/restore,
//!   translate, rotate, draw image)
//! - **PixelCanvas**: in-memory RGBA surface for headless rendering
//! - **MacroquadDisplay**: surface over the live macroquad window
//! - **Sprite**: raster image decoded on a background thread
//!
//! Sprite decoding never blocks a draw call. Until a sprite is decoded,
//! drawing it leaves the surface untouched.

pub mod config;
pub mod rendering;

pub use config::RendererConfig;
pub use rendering::{
    MacroquadDisplay, PixelCanvas, Renderer, Sprite, Surface, TransformScope, TransformStack,
};

/// Core error type for the Arrowfield crate.
#[derive(thiserror::Error, Debug)]
pub enum ArrowfieldError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Image could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Sprite pixel data is malformed
    #[error("Invalid sprite: {0}")]
    InvalidSprite(String),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Arrowfield codebase.
pub type ArrowfieldResult<T> = Result<T, ArrowfieldError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
