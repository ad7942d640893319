//! Base renderer with clipping.
//!
//! Wraps a pixel format with a clip rectangle so that every write made by the
//! scanline filler, the line rasterizer and the marker drawing stays inside
//! the framebuffer.

use crate::basics::RectI;
use crate::pixfmt_rgba::PixelFormat;

// ============================================================================
// RendererBase: clip-and-delegate renderer
// ============================================================================

/// Renderer that clips all operations to a rectangle before delegating to the
/// underlying pixel format.
pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Create a renderer whose clip box is the full buffer extent.
    pub fn new(ren: PF) -> Self {
        let w = ren.width() as i32;
        let h = ren.height() as i32;
        Self {
            ren,
            clip_box: RectI::new(0, 0, w - 1, h - 1),
        }
    }

    pub fn width(&self) -> u32 {
        self.ren.width()
    }

    pub fn height(&self) -> u32 {
        self.ren.height()
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.clip_box.hit_test(x, y)
    }

    // ========================================================================
    // Rendering operations (clip then delegate)
    // ========================================================================

    /// Fill the whole clip box with `c`.
    pub fn clear(&mut self, c: &PF::ColorType) {
        let cb = self.clip_box;
        if !cb.is_valid() {
            return;
        }
        for y in cb.y1..=cb.y2 {
            self.ren.copy_hline(cb.x1, y, (cb.x2 - cb.x1 + 1) as u32, c);
        }
    }

    /// Copy a single pixel (clipped).
    #[inline]
    pub fn copy_pixel(&mut self, x: i32, y: i32, c: &PF::ColorType) {
        if self.inbox(x, y) {
            self.ren.copy_pixel(x, y, c);
        }
    }

    /// Copy a horizontal line from x1 to x2 inclusive (clipped).
    pub fn copy_hline(&mut self, x1: i32, y: i32, x2: i32, c: &PF::ColorType) {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        if y > self.clip_box.y2 || y < self.clip_box.y1 {
            return;
        }
        if x1 > self.clip_box.x2 || x2 < self.clip_box.x1 {
            return;
        }
        let x1 = x1.max(self.clip_box.x1);
        let x2 = x2.min(self.clip_box.x2);
        self.ren.copy_hline(x1, y, (x2 - x1 + 1) as u32, c);
    }

    /// Copy a vertical line from y1 to y2 inclusive (clipped).
    pub fn copy_vline(&mut self, x: i32, y1: i32, y2: i32, c: &PF::ColorType) {
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        if x > self.clip_box.x2 || x < self.clip_box.x1 {
            return;
        }
        for y in y1.max(self.clip_box.y1)..=y2.min(self.clip_box.y2) {
            self.ren.copy_pixel(x, y, c);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
