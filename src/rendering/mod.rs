//! # Rendering Module
//!
//! Drawing surfaces, sprites, and the player renderer.

pub mod canvas;
pub mod display;
pub mod renderer;
pub mod sprite;
pub mod surface;

pub use canvas::*;
pub use display::*;
pub use renderer::*;
pub use sprite::*;
pub use surface::*;
