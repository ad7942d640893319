//! RGBA pixel format.
//!
//! Provides the `PixelFormat` trait and the `PixfmtRgba32` view over a shared
//! [`RenderingBuffer`]. The view is `Copy`, so every fill task gets its own.
//! All writes are opaque copies; nothing in this crate blends.

use crate::color::Rgba8;
use crate::rendering_buffer::RenderingBuffer;

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Abstraction between the renderers and the raw pixel storage.
///
/// Coordinates are not bounds-checked here; `RendererBase` clips first.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Copy (overwrite) a single pixel at (x, y) with color `c`.
    fn copy_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType);

    /// Copy (overwrite) a horizontal line of `len` pixels starting at (x, y).
    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType);
}

// ============================================================================
// PixfmtRgba32
// ============================================================================

/// Pixel format for RGBA32 stored in a shared [`RenderingBuffer`].
#[derive(Clone, Copy)]
pub struct PixfmtRgba32<'a> {
    rbuf: &'a RenderingBuffer,
}

impl<'a> PixfmtRgba32<'a> {
    pub fn new(rbuf: &'a RenderingBuffer) -> Self {
        Self { rbuf }
    }
}

impl PixelFormat for PixfmtRgba32<'_> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.rbuf.width()
    }

    fn height(&self) -> u32 {
        self.rbuf.height()
    }

    #[inline]
    fn copy_pixel(&mut self, x: i32, y: i32, c: &Rgba8) {
        self.rbuf.set_pixel(x as u32, y as u32, *c);
    }

    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8) {
        let v = c.to_packed();
        let row = self.rbuf.row_slice(y as u32);
        let start = x as usize;
        for p in &row[start..start + len as usize] {
            p.store(v, std::sync::atomic::Ordering::Relaxed);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
