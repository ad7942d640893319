//! Outline rasterizer.
//!
//! Wireframe rasterizer that feeds polygon vertices straight to a line
//! renderer (no scanline conversion). The frame composer uses it to overlay
//! the mesh triangulation.

use crate::basics::{PointD, Triangle};
use crate::pixfmt_rgba::PixelFormat;
use crate::renderer_primitives::RendererPrimitives;

// ============================================================================
// RendererPrimitivesLike trait
// ============================================================================

/// Renderers that can draw connected line strokes.
pub trait RendererPrimitivesLike {
    type Color: Clone;

    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_line_color(&mut self, c: Self::Color);
}

/// Line renderer that remembers the pen position between strokes.
pub struct PrimitivesPen<'r, 'a, PF: PixelFormat> {
    prim: &'r mut RendererPrimitives<'a, PF>,
    curr: PointD,
}

impl<'r, 'a, PF: PixelFormat> PrimitivesPen<'r, 'a, PF> {
    pub fn new(prim: &'r mut RendererPrimitives<'a, PF>) -> Self {
        Self {
            prim,
            curr: PointD::default(),
        }
    }
}

impl<PF: PixelFormat> RendererPrimitivesLike for PrimitivesPen<'_, '_, PF>
where
    PF::ColorType: Default + Clone,
{
    type Color = PF::ColorType;

    fn move_to(&mut self, x: f64, y: f64) {
        self.curr = PointD::new(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let next = PointD::new(x, y);
        self.prim.line_d(self.curr, next);
        self.curr = next;
    }

    fn set_line_color(&mut self, c: PF::ColorType) {
        self.prim.set_line_color(c);
    }
}

// ============================================================================
// RasterizerOutline
// ============================================================================

/// Outline rasterizer: move_to / line_to / close over a primitive renderer.
pub struct RasterizerOutline<'a, Ren: RendererPrimitivesLike> {
    ren: &'a mut Ren,
    start: PointD,
    vertices: u32,
}

impl<'a, Ren: RendererPrimitivesLike> RasterizerOutline<'a, Ren> {
    pub fn new(ren: &'a mut Ren) -> Self {
        Self {
            ren,
            start: PointD::default(),
            vertices: 0,
        }
    }

    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.vertices = 1;
        self.start = PointD::new(x, y);
        self.ren.move_to(x, y);
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.vertices += 1;
        self.ren.line_to(x, y);
    }

    /// Close the current polygon by drawing back to its first vertex.
    pub fn close(&mut self) {
        if self.vertices > 2 {
            let start = self.start;
            self.line_to_d(start.x, start.y);
        }
        self.vertices = 0;
    }

    /// Stroke a closed polygon.
    pub fn add_polygon(&mut self, points: &[PointD]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to_d(first.x, first.y);
        for p in rest {
            self.line_to_d(p.x, p.y);
        }
        self.close();
    }

    /// Stroke the three edges of a triangle.
    pub fn add_triangle(&mut self, tri: &Triangle) {
        self.add_polygon(&tri.points());
    }

    /// Stroke every triangle with one color.
    pub fn render_triangles(&mut self, triangles: &[Triangle], color: Ren::Color) {
        self.ren.set_line_color(color);
        for tri in triangles {
            self.add_triangle(tri);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
