//! Basic shape primitives renderer.
//!
//! Draws Bresenham lines, solid ellipses (control-point and light markers) and
//! rectangle outlines (the raster border) directly into a `RendererBase`,
//! without anti-aliasing.

use crate::basics::{PointD, RectI};
use crate::pixfmt_rgba::PixelFormat;
use crate::renderer_base::RendererBase;

// ============================================================================
// RendererPrimitives
// ============================================================================

/// Basic shape primitives renderer.
///
/// Keeps separate fill and line colors. Lines use the line color, solid
/// shapes use the fill color.
pub struct RendererPrimitives<'a, PF: PixelFormat> {
    ren: &'a mut RendererBase<PF>,
    fill_color: PF::ColorType,
    line_color: PF::ColorType,
}

impl<'a, PF: PixelFormat> RendererPrimitives<'a, PF>
where
    PF::ColorType: Default + Clone,
{
    pub fn new(ren: &'a mut RendererBase<PF>) -> Self {
        Self {
            ren,
            fill_color: PF::ColorType::default(),
            line_color: PF::ColorType::default(),
        }
    }

    /// Convert a floating-point raster coordinate to a pixel index.
    #[inline]
    pub fn coord(c: f64) -> i32 {
        c.floor() as i32
    }

    pub fn set_fill_color(&mut self, c: PF::ColorType) {
        self.fill_color = c;
    }

    pub fn set_line_color(&mut self, c: PF::ColorType) {
        self.line_color = c;
    }

    /// Draw a Bresenham line from (x1,y1) to (x2,y2), end point excluded.
    ///
    /// The shallow and steep cases get their own walk; endpoints are swapped
    /// so that the walk always advances in the positive direction of the
    /// major axis. Exactly one pixel is set per major-axis step.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if (y2 - y1).abs() < (x2 - x1).abs() {
            if x1 > x2 {
                self.line_low(x2, y2, x1, y1);
            } else {
                self.line_low(x1, y1, x2, y2);
            }
        } else if y1 > y2 {
            self.line_high(x2, y2, x1, y1);
        } else {
            self.line_high(x1, y1, x2, y2);
        }
    }

    /// Draw a line between two raster-space points.
    pub fn line_d(&mut self, p0: PointD, p1: PointD) {
        self.line(
            Self::coord(p0.x),
            Self::coord(p0.y),
            Self::coord(p1.x),
            Self::coord(p1.y),
        );
    }

    /// |dy| < |dx|, x1 <= x2.
    fn line_low(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 - x1;
        let mut dy = y2 - y1;
        let mut yi = 1;
        if dy < 0 {
            yi = -1;
            dy = -dy;
        }
        let mut d = 2 * dy - dx;
        let mut y = y1;
        let lc = self.line_color.clone();
        for x in x1..x2 {
            self.ren.copy_pixel(x, y, &lc);
            if d > 0 {
                y += yi;
                d += 2 * (dy - dx);
            } else {
                d += 2 * dy;
            }
        }
    }

    /// |dy| >= |dx|, y1 <= y2.
    fn line_high(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let mut dx = x2 - x1;
        let dy = y2 - y1;
        let mut xi = 1;
        if dx < 0 {
            xi = -1;
            dx = -dx;
        }
        let mut d = 2 * dx - dy;
        let mut x = x1;
        let lc = self.line_color.clone();
        for y in y1..y2 {
            self.ren.copy_pixel(x, y, &lc);
            if d > 0 {
                x += xi;
                d += 2 * (dx - dy);
            } else {
                d += 2 * dx;
            }
        }
    }

    /// Draw a solid filled ellipse centred on (x, y) (fill color only).
    ///
    /// Only rows that intersect the clip box are walked, so a centre far
    /// outside the buffer draws nothing.
    pub fn solid_ellipse(&mut self, x: i32, y: i32, rx: i32, ry: i32) {
        if rx < 0 || ry < 0 {
            return;
        }
        let mut bbox = RectI::new(
            x.saturating_sub(rx),
            y.saturating_sub(ry),
            x.saturating_add(rx),
            y.saturating_add(ry),
        );
        if !bbox.clip(self.ren.clip_box()) {
            return;
        }
        let fc = self.fill_color.clone();
        if ry == 0 {
            self.ren.copy_hline(bbox.x1, y, bbox.x2, &fc);
            return;
        }
        let ry_f = ry as f64;
        for row in bbox.y1..=bbox.y2 {
            let dy = row as i64 - y as i64;
            let t = dy as f64 / ry_f;
            let dx = (rx as f64 * (1.0 - t * t).max(0.0).sqrt()).round() as i32;
            self.ren
                .copy_hline(x.saturating_sub(dx), row, x.saturating_add(dx), &fc);
        }
    }

    /// Draw an outlined rectangle with inclusive corners (line color only).
    pub fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let lc = self.line_color.clone();
        self.ren.copy_hline(x1, y1, x2, &lc);
        self.ren.copy_hline(x1, y2, x2, &lc);
        self.ren.copy_vline(x1, y1, y2, &lc);
        self.ren.copy_vline(x2, y1, y2, &lc);
    }
}

// ============================================================================
// Tests
// ============================================================================
