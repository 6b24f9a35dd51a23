//! # Drawing Surface
//!
//! Canvas-style drawing context shared by every render target.

use crate::rendering::Sprite;
use macroquad::math::{Affine2, Vec2};
use std::ops::{Deref, DerefMut};

/// A 2D raster drawing context.
///
/// Coordinates are in pixels with the origin at the top-left corner and
/// y pointing down, so a positive rotation turns clockwise on screen.
/// `translate` and `rotate` compose onto the current transform the way an
/// HTML canvas does.
pub trait Surface {
    /// Current width in pixels.
    fn width(&self) -> u32;

    /// Current height in pixels.
    fn height(&self) -> u32;

    /// Erases a rectangle, given in the current coordinate space.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Pushes a copy of the current transform.
    fn save(&mut self);

    /// Pops the most recently saved transform. No-op when nothing is saved.
    fn restore(&mut self);

    /// Moves the origin by (x, y).
    fn translate(&mut self, x: f32, y: f32);

    /// Rotates the coordinate space clockwise by `radians`.
    fn rotate(&mut self, radians: f32);

    /// The current user-space to device-space transform.
    fn transform(&self) -> Affine2;

    /// Draws a sprite with its top-left corner at (x, y) in the current
    /// coordinate space. Draws nothing while the sprite is not decoded.
    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32);

    /// Frees any per-sprite resources the surface cached for `sprite`.
    fn release_sprite(&mut self, _sprite: &Sprite) {}
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).clear_rect(x, y, width, height)
    }

    fn save(&mut self) {
        (**self).save()
    }

    fn restore(&mut self) {
        (**self).restore()
    }

    fn translate(&mut self, x: f32, y: f32) {
        (**self).translate(x, y)
    }

    fn rotate(&mut self, radians: f32) {
        (**self).rotate(radians)
    }

    fn transform(&self) -> Affine2 {
        (**self).transform()
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32) {
        (**self).draw_image(sprite, x, y)
    }

    fn release_sprite(&mut self, sprite: &Sprite) {
        (**self).release_sprite(sprite)
    }
}

/// Saved-transform bookkeeping for surface implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    current: Affine2,
    saved: Vec<Affine2>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Creates a stack holding only the identity transform.
    pub fn new() -> Self {
        Self {
            current: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> Affine2 {
        self.current
    }

    /// Number of transforms waiting to be restored.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.current = transform;
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.current = self.current * Affine2::from_translation(Vec2::new(x, y));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current = self.current * Affine2::from_angle(radians);
    }

    /// Drops every saved transform and returns to identity.
    pub fn reset(&mut self) {
        self.current = Affine2::IDENTITY;
        self.saved.clear();
    }
}

/// Scoped transform: saves on creation and restores on drop.
///
/// Restoration also runs while unwinding, so a panicking draw call cannot
/// leak a transform into later calls.
///
/// ```
/// use arrowfield::{PixelCanvas, Surface, TransformScope};
///
/// let mut canvas = PixelCanvas::new(64, 64);
/// let before = canvas.transform();
/// {
///     let mut scope = TransformScope::new(&mut canvas);
///     scope.translate(10.0, 20.0);
///     scope.rotate(1.0);
/// }
/// assert_eq!(canvas.transform(), before);
/// ```
pub struct TransformScope<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> TransformScope<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for TransformScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for TransformScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for TransformScope<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
