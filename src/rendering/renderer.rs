//! # Player Renderer
//!
//! Clears the surface and draws the two player sprites each frame.

use crate::config::RendererConfig;
use crate::rendering::{Sprite, Surface, TransformScope};

/// Draws the local player and every other player onto a surface.
///
/// The surface handle is supplied by the caller; pass `&mut surface` to
/// keep ownership outside the renderer. Both sprites belong to the
/// renderer and are never replaced.
///
/// # Examples
///
/// ```
/// use arrowfield::{PixelCanvas, Renderer, Sprite};
///
/// let mut canvas = PixelCanvas::new(320, 240);
/// let arrow = Sprite::from_rgba("arrow", 32, 32, vec![255; 32 * 32 * 4]).unwrap();
/// let enemy = Sprite::from_rgba("enemy", 32, 32, vec![128; 32 * 32 * 4]).unwrap();
///
/// let mut renderer = Renderer::with_sprites(&mut canvas, arrow, enemy);
/// renderer.clear();
/// renderer.draw_self(100.0, 100.0, 45.0, 16.0);
/// renderer.draw_other(200.0, 80.0, 270.0, 16.0);
/// assert!(!canvas.is_blank());
/// ```
pub struct Renderer<S: Surface> {
    surface: S,
    self_sprite: Sprite,
    other_sprite: Sprite,
}

impl<S: Surface> Renderer<S> {
    /// Creates a renderer with the default arrow and enemy sprites.
    ///
    /// Sprites decode in the background; until they finish, draw calls
    /// leave the surface untouched. A sprite that fails to load stays
    /// invisible.
    pub fn create(surface: S) -> Self {
        Self::with_config(surface, &RendererConfig::default())
    }

    /// Creates a renderer loading sprites named by `config`.
    pub fn with_config(surface: S, config: &RendererConfig) -> Self {
        log::info!(
            "Creating renderer (self: {}, other: {}, {}x{})",
            config.self_sprite.display(),
            config.other_sprite.display(),
            config.sprite_width,
            config.sprite_height
        );

        let self_sprite = Sprite::load(
            config.self_sprite.clone(),
            config.sprite_width,
            config.sprite_height,
        );
        let other_sprite = Sprite::load(
            config.other_sprite.clone(),
            config.sprite_width,
            config.sprite_height,
        );
        Self::with_sprites(surface, self_sprite, other_sprite)
    }

    /// Creates a renderer around sprites the caller already built.
    pub fn with_sprites(surface: S, self_sprite: Sprite, other_sprite: Sprite) -> Self {
        Self {
            surface,
            self_sprite,
            other_sprite,
        }
    }

    /// Erases the whole surface at its current size.
    pub fn clear(&mut self) {
        let width = self.surface.width() as f32;
        let height = self.surface.height() as f32;
        self.surface.clear_rect(0.0, 0.0, width, height);
    }

    /// Draws the local player's sprite centred on (x, y), rotated
    /// clockwise by `orientation` degrees about that point.
    ///
    /// `size` is currently ignored; the sprite keeps its own footprint.
    pub fn draw_self(&mut self, x: f32, y: f32, orientation: f32, size: f32) {
        draw_centred(&mut self.surface, &self.self_sprite, x, y, orientation, size);
    }

    /// Same as [`Renderer::draw_self`], using the other-player sprite.
    pub fn draw_other(&mut self, x: f32, y: f32, orientation: f32, size: f32) {
        draw_centred(&mut self.surface, &self.other_sprite, x, y, orientation, size);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Releases the surface handle, dropping both sprites.
    ///
    /// The surface is told to free whatever it cached for them, so a
    /// long-lived display can be handed to a new renderer.
    pub fn into_surface(mut self) -> S {
        self.surface.release_sprite(&self.self_sprite);
        self.surface.release_sprite(&self.other_sprite);
        self.surface
    }

    pub fn self_sprite(&self) -> &Sprite {
        &self.self_sprite
    }

    pub fn other_sprite(&self) -> &Sprite {
        &self.other_sprite
    }
}

fn draw_centred<S: Surface + ?Sized>(
    surface: &mut S,
    sprite: &Sprite,
    x: f32,
    y: f32,
    orientation: f32,
    _size: f32,
) {
    let mut scope = TransformScope::new(surface);
    scope.translate(x, y);
    scope.rotate(orientation.to_radians());
    scope.draw_image(
        sprite,
        -(sprite.width() as f32) / 2.0,
        -(sprite.height() as f32) / 2.0,
    );
}
