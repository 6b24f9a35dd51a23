//! # Sprites
//!
//! Raster images drawn for players. Files are decoded on a background
//! thread; a sprite is usable (as a no-op) before decoding finishes.

use crate::{ArrowfieldError, ArrowfieldResult};
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static NEXT_SPRITE_ID: AtomicU64 = AtomicU64::new(1);

/// Outcome of decoding a sprite's source.
#[derive(Debug)]
enum SpriteState {
    Ready(RgbaImage),
    Failed,
}

/// A decoded (or decoding) raster image with a fixed footprint.
#[derive(Debug)]
pub struct Sprite {
    id: u64,
    source: PathBuf,
    width: u32,
    height: u32,
    state: Arc<OnceLock<SpriteState>>,
}

impl Sprite {
    /// Starts decoding `path` and returns without waiting.
    ///
    /// The image is scaled to `width`×`height` if its intrinsic size
    /// differs. A file that cannot be read or decoded leaves the sprite
    /// permanently failed; the failure is logged and otherwise ignored.
    pub fn load(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        let source = path.into();
        let state = Arc::new(OnceLock::new());

        log::debug!("Loading sprite {}", source.display());

        let cell = Arc::clone(&state);
        let path = source.clone();
        let spawned = std::thread::Builder::new()
            .name("sprite-decode".to_string())
            .spawn(move || {
                let _ = cell.set(decode(&path, width, height));
            });

        if let Err(e) = spawned {
            log::warn!(
                "Could not start decoder for sprite {}: {}",
                source.display(),
                e
            );
            let _ = state.set(SpriteState::Failed);
        }

        Self {
            id: next_id(),
            source,
            width,
            height,
            state,
        }
    }

    /// Wraps an already decoded image. The sprite is ready immediately.
    pub fn from_image(label: impl Into<PathBuf>, image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            id: next_id(),
            source: label.into(),
            width,
            height,
            state: Arc::new(OnceLock::from(SpriteState::Ready(image))),
        }
    }

    /// Wraps raw RGBA8 pixels laid out row by row.
    pub fn from_rgba(
        label: impl Into<PathBuf>,
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    ) -> ArrowfieldResult<Self> {
        let len = bytes.len();
        let image = RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
            ArrowfieldError::InvalidSprite(format!(
                "{} bytes cannot hold a {}x{} RGBA image",
                len, width, height
            ))
        })?;
        Ok(Self::from_image(label, image))
    }

    /// Process-unique identifier, stable for the sprite's lifetime.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Path the sprite was loaded from, or the label it was built with.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True while the background decode has not finished.
    pub fn is_pending(&self) -> bool {
        self.state.get().is_none()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state.get(), Some(SpriteState::Ready(_)))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state.get(), Some(SpriteState::Failed))
    }

    /// Decoded pixels, once available.
    pub fn pixels(&self) -> Option<&RgbaImage> {
        match self.state.get() {
            Some(SpriteState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    /// RGBA value at (x, y), if decoded and in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let image = self.pixels()?;
        if x >= image.width() || y >= image.height() {
            return None;
        }
        Some(image.get_pixel(x, y).0)
    }
}

fn next_id() -> u64 {
    NEXT_SPRITE_ID.fetch_add(1, Ordering::Relaxed)
}

fn decode(path: &Path, width: u32, height: u32) -> SpriteState {
    match decode_file(path, width, height) {
        Ok(image) => {
            log::debug!(
                "Decoded sprite {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            SpriteState::Ready(image)
        }
        Err(e) => {
            log::warn!("Failed to load sprite {}: {}", path.display(), e);
            SpriteState::Failed
        }
    }
}

fn decode_file(path: &Path, width: u32, height: u32) -> ArrowfieldResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(ArrowfieldError::InvalidSprite(format!(
            "zero-sized footprint {}x{}",
            width, height
        )));
    }

    let image = image::open(path)?.to_rgba8();
    if image.dimensions() == (width, height) {
        return Ok(image);
    }
    Ok(image::imageops::resize(&image, width, height, FilterType::Nearest))
}
