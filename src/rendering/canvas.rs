//! # Pixel Canvas
//!
//! CPU-side RGBA surface for headless rendering. Blank pixels are
//! transparent black.

use crate::rendering::{Sprite, Surface, TransformStack};
use macroquad::math::{Affine2, Vec2};

const BLANK: [u8; 4] = [0, 0, 0, 0];

/// In-memory RGBA8 surface, row-major, 4 bytes per pixel.
///
/// ```
/// use arrowfield::{PixelCanvas, Surface};
///
/// let mut canvas = PixelCanvas::new(320, 240);
/// assert!(canvas.is_blank());
/// canvas.resize(640, 480);
/// assert_eq!((canvas.width(), canvas.height()), (640, 480));
/// ```
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    transforms: TransformStack,
}

impl PixelCanvas {
    /// Creates a blank canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; width as usize * height as usize * 4],
            transforms: TransformStack::new(),
        }
    }

    /// Changes the canvas size. Content and transform state are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.buffer = vec![0u8; width as usize * height as usize * 4];
        self.transforms.reset();
    }

    /// RGBA value at (x, y), or None outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(rgba)
    }

    /// Overwrites a single pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.buffer[idx..idx + 4].copy_from_slice(&rgba);
        }
    }

    /// True when every pixel is transparent black.
    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|&b| b == 0)
    }

    /// True when every pixel of the device-space rectangle that lies on
    /// the canvas is transparent black.
    pub fn region_is_blank(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        (y..y_end).all(|py| (x..x_end).all(|px| self.pixel(px, py) == Some(BLANK)))
    }

    /// Raw pixel buffer.
    pub fn as_rgba(&self) -> &[u8] {
        &self.buffer
    }

    /// Count of pixels that are not transparent black.
    pub fn painted_pixels(&self) -> usize {
        self.buffer
            .chunks_exact(4)
            .filter(|px| px.iter().any(|&b| b != 0))
            .count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let transform = self.transforms.current();
        let Self {
            width: canvas_width,
            height: canvas_height,
            buffer,
            ..
        } = self;
        let rect = Rect::new(x, y, width, height);
        rasterize(transform, rect, *canvas_width, *canvas_height, |idx, _| {
            buffer[idx..idx + 4].copy_from_slice(&BLANK);
        });
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
        let Some(image) = sprite.pixels() else {
            return;
        };

        let transform = self.transforms.current();
        let Self {
            width: canvas_width,
            height: canvas_height,
            buffer,
            ..
        } = self;
        let rect = Rect::new(x, y, image.width() as f32, image.height() as f32);
        rasterize(transform, rect, *canvas_width, *canvas_height, |idx, local| {
            let u = ((local.x - x).floor() as u32).min(image.width() - 1);
            let v = ((local.y - y).floor() as u32).min(image.height() - 1);
            blend(&mut buffer[idx..idx + 4], image.get_pixel(u, v).0);
        });
    }
}

/// Axis-aligned rectangle in user space, normalised to positive extent.
#[derive(Debug, Clone, Copy)]
struct Rect {
    min: Vec2,
    max: Vec2,
}

impl Rect {
    fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let a = Vec2::new(x, y);
        let b = Vec2::new(x + width, y + height);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// Visits every canvas pixel whose centre maps inside `rect` under the
/// inverse of `transform`, passing the buffer index and the user-space
/// point.
fn rasterize(
    transform: Affine2,
    rect: Rect,
    width: u32,
    height: u32,
    mut visit: impl FnMut(usize, Vec2),
) {
    if width == 0 || height == 0 || !transform.is_finite() {
        return;
    }
    let inverse = transform.inverse();
    if !inverse.is_finite() {
        return;
    }

    let corners = rect.corners().map(|c| transform.transform_point2(c));
    if corners.iter().any(|c| !c.is_finite()) {
        return;
    }
    let lo = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, c| acc.min(*c));
    let hi = corners
        .iter()
        .fold(Vec2::splat(f32::NEG_INFINITY), |acc, c| acc.max(*c));

    let x0 = lo.x.floor().max(0.0) as u32;
    let y0 = lo.y.floor().max(0.0) as u32;
    let x1 = (hi.x.ceil().min(width as f32)).max(0.0) as u32;
    let y1 = (hi.y.ceil().min(height as f32)).max(0.0) as u32;

    for py in y0..y1 {
        for px in x0..x1 {
            let centre = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
            let local = inverse.transform_point2(centre);
            if rect.contains(local) {
                let idx = (py as usize * width as usize + px as usize) * 4;
                visit(idx, local);
            }
        }
    }
}

/// Source-over compositing of a straight-alpha RGBA pixel.
fn blend(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src),
        alpha => {
            let a = alpha as u32;
            let inv = 255 - a;
            for (d, s) in dst.iter_mut().zip(src).take(3) {
                *d = ((s as u32 * a + *d as u32 * inv + 127) / 255) as u8;
            }
            dst[3] = (a + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
        }
    }
}
