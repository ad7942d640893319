//! Shared RGBA framebuffer.
//!
//! Every pixel is an `AtomicU32` holding packed RGBA8, so any number of fill
//! tasks can write through a shared `&RenderingBuffer` at once. Writes use
//! relaxed ordering: two tasks hitting the same pixel on a shared triangle
//! edge is a last-writer-wins race, which only shows up as a possible seam.
//! The parallel pass that owns the writes joins before the buffer is read.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::color::Rgba8;

/// RGBA32 framebuffer with interior-mutable pixels. Rows are top-down.
pub struct RenderingBuffer {
    pixels: Vec<AtomicU32>,
    width: u32,
    height: u32,
}

impl RenderingBuffer {
    /// Create a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(len);
        pixels.resize_with(len, || AtomicU32::new(0));
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Row `y` as a slice of packed pixels.
    pub fn row_slice(&self, y: u32) -> &[AtomicU32] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Read the pixel at (x, y). Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        Rgba8::from_packed(self.pixels[self.index(x, y)].load(Ordering::Relaxed))
    }

    /// Overwrite the pixel at (x, y). Panics when out of bounds.
    #[inline]
    pub fn set_pixel(&self, x: u32, y: u32, c: Rgba8) {
        self.pixels[self.index(x, y)].store(c.to_packed(), Ordering::Relaxed);
    }

    /// Copy out the pixels as tightly packed RGBA bytes, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&p.load(Ordering::Relaxed).to_le_bytes());
        }
        out
    }

    /// Encode the buffer as a PNG file.
    #[cfg(feature = "image")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> crate::error::Result<()> {
        image::save_buffer(
            path,
            &self.to_rgba_bytes(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

impl Clone for RenderingBuffer {
    fn clone(&self) -> Self {
        Self {
            pixels: self
                .pixels
                .iter()
                .map(|p| AtomicU32::new(p.load(Ordering::Relaxed)))
                .collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for RenderingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderingBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
