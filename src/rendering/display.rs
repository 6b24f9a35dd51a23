//! # Display Management
//!
//! Window surface backed by macroquad. Must only be used from the thread
//! that owns the macroquad context.

use crate::rendering::{Sprite, Surface, TransformStack};
use macroquad::prelude::*;
use std::collections::HashMap;

/// Macroquad window surface.
///
/// Dimensions are read from the window on every call, so a resized
/// window is always cleared completely. Sprites are uploaded to the GPU
/// the first time they are drawn after decoding.
pub struct MacroquadDisplay {
    /// Colour the window is cleared to
    pub background: Color,
    /// Uploaded sprite textures, keyed by sprite id
    textures: HashMap<u64, Texture2D>,
    /// Canvas-style transform state
    transforms: TransformStack,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a display that clears to black.
    pub fn new() -> Self {
        Self::with_background(BLACK)
    }

    pub fn with_background(background: Color) -> Self {
        Self {
            background,
            textures: HashMap::new(),
            transforms: TransformStack::new(),
        }
    }

    /// Number of sprites uploaded so far.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Drops the uploaded texture for `sprite`, if any. Returns whether a
    /// texture was evicted.
    pub fn forget(&mut self, sprite: &Sprite) -> bool {
        let evicted = self.textures.remove(&sprite.id()).is_some();
        if evicted {
            log::debug!("Evicted texture for sprite {}", sprite.source().display());
        }
        evicted
    }

    /// Returns the texture for a decoded sprite, uploading it on first use.
    fn texture_for(&mut self, sprite: &Sprite) -> Option<Texture2D> {
        if let Some(texture) = self.textures.get(&sprite.id()) {
            return Some(texture.clone());
        }

        let image = sprite.pixels()?;
        let (Ok(width), Ok(height)) = (u16::try_from(image.width()), u16::try_from(image.height()))
        else {
            log::warn!(
                "Sprite {} is too large for a texture ({}x{})",
                sprite.source().display(),
                image.width(),
                image.height()
            );
            return None;
        };

        let texture = Texture2D::from_rgba8(width, height, image.as_raw());
        texture.set_filter(FilterMode::Nearest);
        log::debug!("Uploaded texture for sprite {}", sprite.source().display());
        // Note: textures are reference-counted, so cloning is cheap
        self.textures.insert(sprite.id(), texture.clone());
        Some(texture)
    }
}

/// Window size in whole pixels. Logical sizes are fractional under HiDPI
/// scaling, so round up to keep the last partial row and column.
fn whole_pixels(logical: f32) -> u32 {
    logical.max(0.0).ceil() as u32
}

/// Screen-space bounding box of a user-space rectangle.
fn clear_bounds(transform: Affine2, x: f32, y: f32, width: f32, height: f32) -> Rect {
    let corners = [
        vec2(x, y),
        vec2(x + width, y),
        vec2(x + width, y + height),
        vec2(x, y + height),
    ]
    .map(|c| transform.transform_point2(c));

    let lo = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, c| acc.min(*c));
    let hi = corners
        .iter()
        .fold(Vec2::splat(f32::NEG_INFINITY), |acc, c| acc.max(*c));
    Rect::new(lo.x, lo.y, hi.x - lo.x, hi.y - lo.y)
}

/// True when `bounds` reaches every edge of a `screen_w`×`screen_h` window.
fn covers_window(bounds: Rect, screen_w: f32, screen_h: f32) -> bool {
    bounds.x <= 0.0
        && bounds.y <= 0.0
        && bounds.x + bounds.w >= screen_w
        && bounds.y + bounds.h >= screen_h
}

/// Screen position and draw parameters for an image of `size` placed at
/// (x, y) under `transform`. Shear is not representable and is dropped.
fn texture_params(transform: Affine2, x: f32, y: f32, size: Vec2) -> (Vec2, DrawTextureParams) {
    let x_axis = transform.matrix2.x_axis;
    let y_axis = transform.matrix2.y_axis;
    let origin = transform.transform_point2(vec2(x, y));

    let params = DrawTextureParams {
        dest_size: Some(size * vec2(x_axis.length(), y_axis.length())),
        rotation: x_axis.y.atan2(x_axis.x),
        pivot: Some(origin),
        ..Default::default()
    };
    (origin, params)
}

impl Surface for MacroquadDisplay {
    fn width(&self) -> u32 {
        whole_pixels(screen_width())
    }

    fn height(&self) -> u32 {
        whole_pixels(screen_height())
    }

    /// Clears the screen-space bounding box of the transformed rectangle,
    /// so a rotated rectangle clears slightly more than its own area.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let transform = self.transforms.current();
        if !transform.is_finite() {
            return;
        }
        let bounds = clear_bounds(transform, x, y, width, height);

        if covers_window(bounds, screen_width(), screen_height()) {
            clear_background(self.background);
        } else {
            draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, self.background);
        }
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transforms.translate(x, y);
    }

    fn rotate(&mut self, radians: f32) {
        self.transforms.rotate(radians);
    }

    fn transform(&self) -> Affine2 {
        self.transforms.current()
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32) {
        let transform = self.transforms.current();
        if !transform.is_finite() {
            return;
        }
        let Some(texture) = self.texture_for(sprite) else {
            return;
        };

        let size = vec2(texture.width(), texture.height());
        let (origin, params) = texture_params(transform, x, y, size);
        draw_texture_ex(&texture, origin.x, origin.y, WHITE, params);
    }

    fn release_sprite(&mut self, sprite: &Sprite) {
        self.forget(sprite);
    }
}
