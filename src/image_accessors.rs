//! Decoded image access for backgrounds and normal maps.
//!
//! Images are sampled with nearest-pixel lookup and no filtering. Coordinates
//! outside the image clamp to the nearest edge pixel.

use crate::color::Rgba8;
use crate::error::{Result, ShadeError};

// ============================================================================
// ImageSource
// ============================================================================

/// An immutable RGBA8 image, row-major, top-down.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageSource {
    /// Wrap tightly packed RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(ShadeError::ImageSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An image filled with a single color.
    pub fn solid(width: u32, height: u32, c: Rgba8) -> Result<Self> {
        let px: [u8; 4] = c.into();
        let data = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::from_rgba8(width, height, data)
    }

    /// Convert any decoded image.
    #[cfg(feature = "image")]
    pub fn from_dynamic(img: &image::DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Self::from_rgba8(w, h, rgba.into_raw())
    }

    /// Decode an image file.
    #[cfg(feature = "image")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let img = image::open(path.as_ref())?;
        log::debug!(
            "decoded {} ({}x{})",
            path.as_ref().display(),
            img.width(),
            img.height()
        );
        Self::from_dynamic(&img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), clamped to the image bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        let off = (y * self.width as usize + x) * 4;
        Rgba8::new(
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
