//! Foundation geometry types.
//!
//! Points, triangles and integer rectangles shared by the rasterizers, the
//! mesh and the frame composer.

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Point in raster pixel space.
pub type PointD = PointBase<f64>;

impl PointD {
    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &PointD) -> f64 {
        crate::math::calc_distance(self.x, self.y, other.x, other.y)
    }
}

// ============================================================================
// Triangle
// ============================================================================

/// Three raster-space vertices. Winding is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p0: PointD,
    pub p1: PointD,
    pub p2: PointD,
}

impl Triangle {
    pub fn new(p0: PointD, p1: PointD, p2: PointD) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn points(&self) -> [PointD; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Twice the signed area. Positive for counter-clockwise winding in a
    /// y-up frame, which is clockwise on a y-down raster.
    pub fn doubled_area(&self) -> f64 {
        (self.p1.x - self.p0.x) * (self.p2.y - self.p0.y)
            - (self.p2.x - self.p0.x) * (self.p1.y - self.p0.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two inclusive corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Clip to the intersection with `r`. Returns `true` if non-empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        if self.x2 > r.x2 {
            self.x2 = r.x2;
        }
        if self.y2 > r.y2 {
            self.y2 = r.y2;
        }
        if self.x1 < r.x1 {
            self.x1 = r.x1;
        }
        if self.y1 < r.y1 {
            self.y1 = r.y1;
        }
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

// ============================================================================
// Tests
// ============================================================================
