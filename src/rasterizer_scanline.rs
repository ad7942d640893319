//! Scanline polygon filler driven by an active-edge table.
//!
//! Vertices are visited in Y order. When the sweep reaches a vertex, each of
//! its two edges is toggled: an edge running down to a lower neighbor (larger
//! Y) enters the table, an edge coming from an upper neighbor leaves it, and
//! a horizontal edge is never entered. Each integer scanline then fills the
//! spans between consecutive pairs of active edges sorted by X.
//!
//! Pixels are sampled at integer coordinates. A scanline `y` belongs to an
//! edge when `y_top <= y < y_bottom`, and a span covers `x0 <= x < x1`, so
//! triangles that share an edge do not both claim its pixels (up to floating
//! point rounding).

use crate::basics::{PointD, RectI, Triangle};
use crate::color::Rgba8;
use crate::pixfmt_rgba::PixelFormat;
use crate::renderer_base::RendererBase;
use crate::scene::ShadingContext;
use crate::span_phong::{normal_from_color, PhongShader};

/// Doubled areas below this are treated as degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

// ============================================================================
// Segment
// ============================================================================

/// A directed polygon edge from its upper endpoint `p0` to its lower `p1`.
///
/// `i0`/`i1` are the endpoint indices within the polygon; two segments are
/// the same edge when they join the same pair of vertices.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub i0: usize,
    pub i1: usize,
    pub p0: PointD,
    pub p1: PointD,
}

impl Segment {
    pub fn new(i0: usize, p0: PointD, i1: usize, p1: PointD) -> Self {
        Self { i0, i1, p0, p1 }
    }

    /// dx/dy, or 0 for a horizontal edge.
    #[inline]
    pub fn growth_rate(&self) -> f64 {
        let dy = self.p1.y - self.p0.y;
        if dy == 0.0 {
            return 0.0;
        }
        (self.p1.x - self.p0.x) / dy
    }

    /// X where the edge's line crosses scanline `y`.
    #[inline]
    pub fn x_at(&self, y: f64) -> f64 {
        self.p0.x + (y - self.p0.y) * self.growth_rate()
    }

    #[inline]
    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.i0 == a && self.i1 == b) || (self.i0 == b && self.i1 == a)
    }
}

// ============================================================================
// ActiveEdgeTable
// ============================================================================

/// The edges crossing the current scanline.
#[derive(Debug, Default)]
pub struct ActiveEdgeTable {
    edges: Vec<Segment>,
}

impl ActiveEdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    pub fn insert(&mut self, seg: Segment) {
        self.edges.push(seg);
    }

    /// Remove the edge joining vertices `a` and `b`, if active.
    pub fn remove(&mut self, a: usize, b: usize) -> bool {
        match self.edges.iter().position(|s| s.joins(a, b)) {
            Some(i) => {
                self.edges.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Toggle the edges around vertex `v` of a closed polygon.
    pub fn toggle_vertex(&mut self, points: &[PointD], v: usize) {
        let n = points.len();
        let curr = points[v];
        for nb in [(v + n - 1) % n, (v + 1) % n] {
            let other = points[nb];
            if other.y > curr.y {
                self.insert(Segment::new(v, curr, nb, other));
            } else if other.y < curr.y {
                self.remove(v, nb);
            }
        }
    }

    /// Sort edges by their X crossing of scanline `y`.
    pub fn sort_at(&mut self, y: f64) {
        self.edges.sort_by(|a, b| a.x_at(y).total_cmp(&b.x_at(y)));
    }

    /// Spans `(x0, x1)` between consecutive edge pairs on scanline `y`.
    /// Call [`sort_at`](Self::sort_at) first.
    pub fn spans(&self, y: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges
            .chunks_exact(2)
            .map(move |pair| (pair[0].x_at(y), pair[1].x_at(y)))
    }
}

// ============================================================================
// Polygon scan
// ============================================================================

/// Visit every pixel of a closed polygon inside `clip`.
///
/// Fewer than three points, or any non-finite coordinate, visits nothing.
pub fn scan_polygon<F: FnMut(i32, i32)>(points: &[PointD], clip: &RectI, mut visit: F) {
    let n = points.len();
    if n < 3 || !clip.is_valid() {
        return;
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| points[a].y.total_cmp(&points[b].y));
    let ymin = points[order[0]].y;
    let ymax = points[order[n - 1]].y;

    let y_first = (ymin.ceil() as i64).max(clip.y1 as i64);
    let y_last = (ymax.ceil() as i64 - 1).min(clip.y2 as i64);

    let mut aet = ActiveEdgeTable::new();
    let mut next = 0;
    for yi in y_first..=y_last {
        let y = yi as f64;
        while next < n - 1 && points[order[next]].y <= y {
            aet.toggle_vertex(points, order[next]);
            next += 1;
        }
        aet.sort_at(y);
        for (x0, x1) in aet.spans(y) {
            let xs = (x0.ceil() as i64).max(clip.x1 as i64);
            let xe = (x1.ceil() as i64 - 1).min(clip.x2 as i64);
            for x in xs..=xe {
                visit(x as i32, yi as i32);
            }
        }
    }
}

// ============================================================================
// Barycentric weights
// ============================================================================

/// Weights (w0, w1, w2) of `p` over triangle `tri`, summing to 1.
///
/// Solved with Cramer's rule; the denominator is the doubled signed area,
/// so a zero-area triangle has no weights.
pub fn barycentric(tri: &[PointD; 3], p: PointD) -> Option<[f64; 3]> {
    let [a, b, c] = *tri;
    let denom = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
    if denom.abs() < DEGENERATE_EPSILON {
        return None;
    }
    let w1 = ((p.x - a.x) * (c.y - a.y) - (c.x - a.x) * (p.y - a.y)) / denom;
    let w2 = ((b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)) / denom;
    Some([1.0 - w1 - w2, w1, w2])
}

// ============================================================================
// Shaded triangle fill
// ============================================================================

/// Fill a triangle with Phong-shaded pixels.
///
/// Only the first three points are used; fewer than three, or a degenerate
/// triangle, draws nothing. `color` is the object color used wherever the
/// scene has no background image. Returns the number of pixels written.
pub fn fill_polygon<PF>(
    points: &[PointD],
    color: Rgba8,
    ren: &mut RendererBase<PF>,
    ctx: &ShadingContext<'_>,
) -> usize
where
    PF: PixelFormat<ColorType = Rgba8>,
{
    if points.len() < 3 {
        return 0;
    }
    let triangle = Triangle::new(points[0], points[1], points[2]);
    if triangle.doubled_area().abs() < DEGENERATE_EPSILON {
        log::trace!("skipping degenerate triangle {:?}", triangle);
        return 0;
    }
    let tri = triangle.points();

    let shader = PhongShader::new(
        ctx.scene.light,
        ctx.scene.shading,
        tri.map(|p| ctx.vertex_sample(p)),
    );
    let clip = *ren.clip_box();
    let mut written = 0;
    scan_polygon(&tri, &clip, |x, y| {
        let (px, py) = (x as f64, y as f64);
        let Some(weights) = barycentric(&tri, PointD::new(px, py)) else {
            return;
        };
        let object = ctx.scene.background.image_at(x, y).unwrap_or(color);
        let normal = ctx
            .scene
            .normal_map
            .as_deref()
            .map(|map| normal_from_color(map.pixel(x, y)));
        ren.copy_pixel(x, y, &shader.shade(px, py, weights, object, normal));
        written += 1;
    });
    written
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::cross_product;

    fn pt(x: f64, y: f64) -> PointD {
        PointD::new(x, y)
    }

    fn collect(points: &[PointD], clip: RectI) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        scan_polygon(points, &clip, |x, y| out.push((x, y)));
        out
    }

    fn big_clip() -> RectI {
        RectI::new(-1000, -1000, 1000, 1000)
    }

    /// +1 strictly inside, -1 strictly outside, 0 on the boundary.
    fn classify(tri: &[PointD; 3], x: f64, y: f64) -> i32 {
        let s = [
            cross_product(tri[0].x, tri[0].y, tri[1].x, tri[1].y, x, y),
            cross_product(tri[1].x, tri[1].y, tri[2].x, tri[2].y, x, y),
            cross_product(tri[2].x, tri[2].y, tri[0].x, tri[0].y, x, y),
        ];
        if s.iter().all(|&v| v > 0.0) || s.iter().all(|&v| v < 0.0) {
            1
        } else if s.iter().any(|&v| v > 0.0) && s.iter().any(|&v| v < 0.0) {
            -1
        } else {
            0
        }
    }

    fn check_against_reference(tri: [PointD; 3]) {
        let got = collect(&tri, big_clip());
        let mut seen = std::collections::HashSet::new();
        for &p in &got {
            assert!(seen.insert(p), "pixel {:?} visited twice", p);
            assert_ne!(classify(&tri, p.0 as f64, p.1 as f64), -1, "{:?} outside", p);
        }
        for y in -5..60 {
            for x in -5..60 {
                if classify(&tri, x as f64, y as f64) == 1 {
                    assert!(seen.contains(&(x, y)), "({}, {}) inside but not filled", x, y);
                }
            }
        }
    }

    #[test]
    fn test_segment_growth_rate() {
        let s = Segment::new(0, pt(0.0, 0.0), 1, pt(10.0, 5.0));
        assert_eq!(s.growth_rate(), 2.0);
        assert_eq!(s.x_at(2.5), 5.0);
        let flat = Segment::new(0, pt(0.0, 3.0), 1, pt(10.0, 3.0));
        assert_eq!(flat.growth_rate(), 0.0);
        assert_eq!(flat.x_at(3.0), 0.0);
        assert!(s.joins(1, 0));
        assert!(!s.joins(0, 2));
    }

    #[test]
    fn test_aet_insert_remove_by_identity() {
        let mut aet = ActiveEdgeTable::new();
        aet.insert(Segment::new(0, pt(1.0, 1.0), 1, pt(1.0, 9.0)));
        aet.insert(Segment::new(2, pt(1.0, 1.0), 3, pt(1.0, 9.0)));
        // Same coordinates, different vertices.
        assert!(aet.remove(3, 2));
        assert_eq!(aet.len(), 1);
        assert_eq!(aet.edges()[0].i0, 0);
        assert!(!aet.remove(3, 2));
    }

    #[test]
    fn test_horizontal_edge_never_active() {
        // Flat top: vertices 0 and 1 share y = 2.
        let tri = [pt(2.0, 2.0), pt(12.0, 2.0), pt(7.0, 12.0)];
        let mut aet = ActiveEdgeTable::new();
        aet.toggle_vertex(&tri, 0);
        aet.toggle_vertex(&tri, 1);
        assert_eq!(aet.len(), 2);
        assert!(aet.edges().iter().all(|s| !s.joins(0, 1)));

        // Flat bottom.
        let tri = [pt(7.0, 2.0), pt(2.0, 12.0), pt(12.0, 12.0)];
        let mut aet = ActiveEdgeTable::new();
        aet.toggle_vertex(&tri, 0);
        assert_eq!(aet.len(), 2);
        aet.toggle_vertex(&tri, 1);
        aet.toggle_vertex(&tri, 2);
        assert!(aet.is_empty());
    }

    #[test]
    fn test_flat_top_spans() {
        let tri = [pt(2.0, 2.0), pt(12.0, 2.0), pt(7.0, 12.0)];
        let got = collect(&tri, big_clip());
        // Top row is inclusive, the apex row exclusive.
        let row = |y: i32| -> Vec<i32> {
            got.iter().filter(|p| p.1 == y).map(|p| p.0).collect()
        };
        assert_eq!(row(2), (2..12).collect::<Vec<_>>());
        assert_eq!(row(7), (5..10).collect::<Vec<_>>());
        assert!(row(12).is_empty());
        assert!(row(1).is_empty());
        check_against_reference(tri);
    }

    #[test]
    fn test_flat_bottom_spans() {
        let tri = [pt(7.0, 2.0), pt(12.0, 12.0), pt(2.0, 12.0)];
        let got = collect(&tri, big_clip());
        assert!(got.iter().all(|p| p.1 >= 2 && p.1 < 12));
        let row11: Vec<i32> = got.iter().filter(|p| p.1 == 11).map(|p| p.0).collect();
        assert_eq!(row11, (3..12).collect::<Vec<_>>());
        check_against_reference(tri);
    }

    #[test]
    fn test_general_triangles_match_reference() {
        check_against_reference([pt(3.5, 1.2), pt(40.3, 17.8), pt(11.1, 52.6)]);
        check_against_reference([pt(50.0, 50.0), pt(0.0, 30.0), pt(25.0, 0.0)]);
        check_against_reference([pt(0.0, 0.0), pt(55.0, 1.0), pt(1.0, 55.0)]);
        // Thin sliver.
        check_against_reference([pt(0.0, 0.0), pt(50.0, 3.0), pt(50.0, 4.0)]);
    }

    #[test]
    fn test_order_independent() {
        let a = [pt(3.5, 1.2), pt(40.3, 17.8), pt(11.1, 52.6)];
        let b = [a[2], a[0], a[1]];
        let c = [a[1], a[0], a[2]];
        let mut pa = collect(&a, big_clip());
        let mut pb = collect(&b, big_clip());
        let mut pc = collect(&c, big_clip());
        pa.sort();
        pb.sort();
        pc.sort();
        assert_eq!(pa, pb);
        assert_eq!(pa, pc);
    }

    #[test]
    fn test_adjacent_triangles_do_not_overlap() {
        let a = [pt(0.0, 0.0), pt(20.0, 0.0), pt(0.0, 20.0)];
        let b = [pt(20.0, 0.0), pt(20.0, 20.0), pt(0.0, 20.0)];
        let pa: std::collections::HashSet<_> = collect(&a, big_clip()).into_iter().collect();
        let pb: std::collections::HashSet<_> = collect(&b, big_clip()).into_iter().collect();
        assert!(pa.is_disjoint(&pb));
        // Together they tile the 20x20 square.
        assert_eq!(pa.len() + pb.len(), 400);
    }

    #[test]
    fn test_clipped_to_rect() {
        let tri = [pt(-30.0, -30.0), pt(80.0, -10.0), pt(10.0, 90.0)];
        let clip = RectI::new(0, 0, 19, 19);
        let got = collect(&tri, clip);
        assert!(!got.is_empty());
        assert!(got.iter().all(|&(x, y)| (0..20).contains(&x) && (0..20).contains(&y)));
        assert!(got.contains(&(0, 0)));
        assert!(got.contains(&(19, 19)));
    }

    #[test]
    fn test_short_and_degenerate_input() {
        assert!(collect(&[pt(0.0, 0.0), pt(5.0, 5.0)], big_clip()).is_empty());
        assert!(collect(&[pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 10.0)], big_clip()).is_empty());
        assert!(collect(&[pt(0.0, 0.0), pt(f64::NAN, 5.0), pt(10.0, 0.0)], big_clip()).is_empty());
    }

    #[test]
    fn test_fill_polygon_skips_short_and_degenerate_input() {
        use crate::bezier_surface::HeightGrid;
        use crate::light::LightState;
        use crate::pixfmt_rgba::PixfmtRgba32;
        use crate::rendering_buffer::RenderingBuffer;
        use crate::scene::SceneSnapshot;
        use crate::span_phong::ShadingParams;

        let clear = Rgba8::new(10, 20, 30, 255);
        let scene = SceneSnapshot::new(
            LightState::new(pt(8.0, 8.0), 100.0, Rgba8::WHITE),
            ShadingParams::new(0.5, 0.5, 10.0),
        );
        let ctx = ShadingContext::new(&scene, HeightGrid::new(2).patch(), 16, 16);
        let buf = RenderingBuffer::new(16, 16);
        let mut ren = RendererBase::new(PixfmtRgba32::new(&buf));
        ren.clear(&clear);
        let untouched = |buf: &RenderingBuffer| {
            (0..16).all(|y| (0..16).all(|x| buf.pixel(x, y) == clear))
        };

        let collinear = [pt(1.0, 1.0), pt(7.0, 7.0), pt(14.0, 14.0)];
        assert_eq!(fill_polygon(&collinear, Rgba8::WHITE, &mut ren, &ctx), 0);
        assert!(untouched(&buf));

        let two = [pt(1.0, 1.0), pt(14.0, 3.0)];
        assert_eq!(fill_polygon(&two, Rgba8::WHITE, &mut ren, &ctx), 0);
        assert!(untouched(&buf));

        let corner = [pt(0.0, 0.0), pt(16.0, 0.0), pt(0.0, 16.0)];
        let written = fill_polygon(&corner, Rgba8::WHITE, &mut ren, &ctx);
        assert!(written > 0);
        let changed = (0..16u32)
            .flat_map(|y| (0..16u32).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.pixel(x, y) != clear)
            .count();
        assert_eq!(changed, written);
        assert_eq!(buf.pixel(15, 15), clear);
    }

    #[test]
    fn test_quad_polygon() {
        // Concave "V": two spans on the upper rows.
        let poly = [
            pt(0.0, 0.0),
            pt(10.0, 10.0),
            pt(20.0, 0.0),
            pt(20.0, 20.0),
            pt(0.0, 20.0),
        ];
        let got = collect(&poly, big_clip());
        let row2: Vec<i32> = got.iter().filter(|p| p.1 == 2).map(|p| p.0).collect();
        assert!(row2.contains(&0) && row2.contains(&19));
        assert!(!row2.contains(&10));
        let row15 = got.iter().filter(|p| p.1 == 15).count();
        assert_eq!(row15, 20);
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let tri = [pt(3.5, 1.2), pt(40.3, 17.8), pt(11.1, 52.6)];
        let unit = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        for (p, expect) in tri.iter().zip(unit) {
            let w = barycentric(&tri, *p).unwrap();
            for k in 0..3 {
                assert!((w[k] - expect[k]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_barycentric_centroid_and_degenerate() {
        let tri = [pt(0.0, 0.0), pt(9.0, 0.0), pt(0.0, 9.0)];
        let w = barycentric(&tri, pt(3.0, 3.0)).unwrap();
        for v in w {
            assert!((v - 1.0 / 3.0).abs() < 1e-12);
        }
        let flat = [pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 10.0)];
        assert!(barycentric(&flat, pt(1.0, 1.0)).is_none());
    }
}
