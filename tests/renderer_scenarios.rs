//! Integration tests for drawing players onto a pixel canvas.

use arrowfield::{PixelCanvas, Renderer, Sprite, Surface};
use macroquad::math::Affine2;
use std::panic::{self, AssertUnwindSafe};

/// 32x32 sprite whose pixel (u, v) is [u * 8, v * 8, tag, 255].
fn gradient_sprite(tag: u8) -> Sprite {
    let mut bytes = Vec::with_capacity(32 * 32 * 4);
    for v in 0..32u8 {
        for u in 0..32u8 {
            bytes.extend_from_slice(&[u * 8, v * 8, tag, 255]);
        }
    }
    Sprite::from_rgba(format!("gradient-{tag}"), 32, 32, bytes).unwrap()
}

fn renderer_for(canvas: &mut PixelCanvas) -> Renderer<&mut PixelCanvas> {
    Renderer::with_sprites(canvas, gradient_sprite(1), gradient_sprite(2))
}

#[test]
fn test_unrotated_sprite_is_centred() {
    let mut canvas = PixelCanvas::new(320, 240);
    renderer_for(&mut canvas).draw_self(100.0, 100.0, 0.0, 16.0);

    for v in 0..32u32 {
        for u in 0..32u32 {
            let expected = [(u * 8) as u8, (v * 8) as u8, 1, 255];
            assert_eq!(canvas.pixel(84 + u, 84 + v), Some(expected), "at ({u}, {v})");
        }
    }
    assert_eq!(canvas.painted_pixels(), 32 * 32);
    assert!(canvas.region_is_blank(0, 0, 320, 84));
    assert!(canvas.region_is_blank(116, 0, 204, 240));
}

#[test]
fn test_quarter_turn_pivots_about_position() {
    let mut canvas = PixelCanvas::new(320, 240);
    renderer_for(&mut canvas).draw_self(100.0, 100.0, 90.0, 16.0);

    let (sin, cos) = 90.0_f32.to_radians().sin_cos();
    for v in 0..32u32 {
        for u in 0..32u32 {
            // Offset of the sprite pixel's centre from the pivot.
            let dx = u as f32 + 0.5 - 16.0;
            let dy = v as f32 + 0.5 - 16.0;
            let rx = dx * cos - dy * sin;
            let ry = dx * sin + dy * cos;
            let px = (100.0 + rx - 0.5).round() as u32;
            let py = (100.0 + ry - 0.5).round() as u32;

            let expected = [(u * 8) as u8, (v * 8) as u8, 1, 255];
            assert_eq!(canvas.pixel(px, py), Some(expected), "sprite ({u}, {v})");
        }
    }
    assert_eq!(canvas.painted_pixels(), 32 * 32);
}

#[test]
fn test_quarter_turn_moves_top_left_corner_to_top_right() {
    let mut canvas = PixelCanvas::new(320, 240);
    renderer_for(&mut canvas).draw_self(100.0, 100.0, 90.0, 16.0);

    // Sprite pixel (0, 0) is [0, 0, 1, 255]; clockwise it lands top-right.
    assert_eq!(canvas.pixel(115, 84), Some([0, 0, 1, 255]));
    // Sprite pixel (31, 0) lands bottom-right.
    assert_eq!(canvas.pixel(115, 115), Some([248, 0, 1, 255]));
}

#[test]
fn test_self_and_other_are_distinct() {
    let mut mine = PixelCanvas::new(320, 240);
    let mut theirs = PixelCanvas::new(320, 240);

    renderer_for(&mut mine).draw_self(160.0, 120.0, 30.0, 16.0);
    renderer_for(&mut theirs).draw_other(160.0, 120.0, 30.0, 16.0);

    assert_eq!(mine.painted_pixels(), theirs.painted_pixels());
    assert_ne!(mine.as_rgba(), theirs.as_rgba());
    assert_eq!(mine.pixel(160, 120).map(|p| p[2]), Some(1));
    assert_eq!(theirs.pixel(160, 120).map(|p| p[2]), Some(2));
}

#[test]
fn test_clear_erases_everything_drawn() {
    let mut canvas = PixelCanvas::new(320, 240);
    let mut renderer = renderer_for(&mut canvas);

    renderer.draw_self(10.0, 10.0, 0.0, 16.0);
    renderer.draw_other(300.0, 230.0, 200.0, 16.0);
    renderer.draw_other(160.0, 120.0, 45.0, 16.0);
    renderer.clear();

    assert!(canvas.is_blank());
}

#[test]
fn test_clear_blank_surface_is_noop() {
    let mut canvas = PixelCanvas::new(320, 240);
    renderer_for(&mut canvas).clear();
    assert!(canvas.is_blank());
    assert_eq!(canvas.transform(), Affine2::IDENTITY);
}

#[test]
fn test_clear_follows_resize() {
    let mut canvas = PixelCanvas::new(320, 240);
    let mut renderer = renderer_for(&mut canvas);

    renderer.surface_mut().resize(640, 480);
    renderer.draw_self(600.0, 450.0, 0.0, 16.0);
    renderer.draw_other(400.0, 300.0, 10.0, 16.0);
    assert!(!renderer.surface().region_is_blank(320, 240, 320, 240));

    renderer.clear();
    assert!(canvas.is_blank());
    assert_eq!((canvas.width(), canvas.height()), (640, 480));
}

#[test]
fn test_clear_after_shrink() {
    let mut canvas = PixelCanvas::new(320, 240);
    let mut renderer = renderer_for(&mut canvas);

    renderer.surface_mut().resize(40, 30);
    renderer.draw_self(20.0, 15.0, 0.0, 16.0);
    renderer.clear();
    assert!(canvas.is_blank());
}

#[test]
fn test_redraw_is_idempotent() {
    let mut once = PixelCanvas::new(320, 240);
    let mut twice = PixelCanvas::new(320, 240);

    renderer_for(&mut once).draw_self(123.0, 77.0, 17.0, 16.0);
    let mut renderer = renderer_for(&mut twice);
    renderer.draw_self(123.0, 77.0, 17.0, 16.0);
    renderer.draw_self(123.0, 77.0, 17.0, 16.0);

    assert_eq!(once.as_rgba(), twice.as_rgba());
}

#[test]
fn test_off_screen_and_extreme_inputs() {
    let mut canvas = PixelCanvas::new(320, 240);
    let mut renderer = renderer_for(&mut canvas);

    renderer.draw_self(-1000.0, -1000.0, 0.0, 16.0);
    renderer.draw_self(1.0e12, 5.0, 1.0e9, 16.0);
    renderer.draw_other(50.0, 50.0, f32::NAN, 16.0);
    renderer.draw_other(f32::INFINITY, 50.0, 0.0, 16.0);

    assert!(canvas.is_blank());
    assert_eq!(canvas.transform(), Affine2::IDENTITY);
}

/// Canvas whose image primitive fails after the transform has been set up.
struct FaultySurface {
    inner: PixelCanvas,
}

impl Surface for FaultySurface {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.inner.clear_rect(x, y, width, height)
    }

    fn save(&mut self) {
        self.inner.save()
    }

    fn restore(&mut self) {
        self.inner.restore()
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.inner.translate(x, y)
    }

    fn rotate(&mut self, radians: f32) {
        self.inner.rotate(radians)
    }

    fn transform(&self) -> Affine2 {
        self.inner.transform()
    }

    fn draw_image(&mut self, _sprite: &Sprite, _x: f32, _y: f32) {
        panic!("image primitive failed");
    }
}

#[test]
fn test_transform_restored_when_draw_panics() {
    let surface = FaultySurface {
        inner: PixelCanvas::new(320, 240),
    };
    let mut renderer = Renderer::with_sprites(surface, gradient_sprite(1), gradient_sprite(2));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        renderer.draw_self(100.0, 100.0, 45.0, 16.0);
    }));
    assert!(result.is_err());
    assert_eq!(renderer.surface().transform(), Affine2::IDENTITY);

    // A later save/restore pair still balances.
    renderer.surface_mut().translate(5.0, 5.0);
    let shifted = renderer.surface().transform();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        renderer.draw_other(10.0, 10.0, 90.0, 16.0);
    }));
    assert!(result.is_err());
    assert_eq!(renderer.surface().transform(), shifted);
}
