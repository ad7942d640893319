//! Vector math and Bernstein polynomials.
//!
//! `Vec3` carries normals, tangents, light and view directions. The 2D helpers
//! work on raw coordinates.

use core::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Vec3
// ============================================================================

/// Three-component `f64` vector. Always passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. The zero vector maps to itself.
    #[inline]
    pub fn normalize(self) -> Vec3 {
        let len = self.length();
        if len == 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(self.x / len, self.y / len, self.z / len)
    }

    /// Sum of three vectors.
    #[inline]
    pub fn add3(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
        Vec3::new(a.x + b.x + c.x, a.y + b.y + c.y, a.z + b.z + c.z)
    }

    pub fn approx_eq(self, rhs: Vec3, epsilon: f64) -> bool {
        (self.x - rhs.x).abs() <= epsilon
            && (self.y - rhs.y).abs() <= epsilon
            && (self.z - rhs.z).abs() <= epsilon
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

// ============================================================================
// Bernstein polynomials
// ============================================================================

/// Binomial coefficient C(n, k). Returns 0 when `k > n`.
pub fn binomial(n: u32, k: u32) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut c = 1u64;
    for i in 0..k {
        c = c * (n - i) / (i + 1);
    }
    c
}

/// Bernstein basis polynomial B(i, n, t) = C(n, i) t^i (1 - t)^(n - i).
#[inline]
pub fn bernstein(i: u32, n: u32, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial(n, i) as f64 * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

// ============================================================================
// 2D helpers
// ============================================================================

/// Cross product of vectors (x2-x1, y2-y1) and (x-x2, y-y2).
/// The sign tells which side of the line (x1,y1)→(x2,y2) the point is on.
#[inline]
pub fn cross_product(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    (x - x2) * (y2 - y1) - (y - y2) * (x2 - x1)
}

/// Euclidean distance between two points.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_cross() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_normalize_idempotent() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 1e-3, 7.5),
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(1e6, -1e6, 1.0),
        ] {
            let n = v.normalize();
            assert!((n.length() - 1.0).abs() < 1e-12);
            assert!(n.normalize().approx_eq(n, 1e-12));
        }
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vec3::new(1.0, -2.0, 0.5);
        let b = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vec3::new(1.5, -1.5, 1.0));
        assert_eq!(a - b, Vec3::new(0.5, -2.5, 0.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, -4.0, 1.0));
        assert_eq!(-b, Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(Vec3::add3(a, b, b), Vec3::new(2.0, -1.0, 1.5));
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(3, 0), 1);
        assert_eq!(binomial(3, 1), 3);
        assert_eq!(binomial(3, 2), 3);
        assert_eq!(binomial(3, 3), 1);
        assert_eq!(binomial(10, 4), 210);
        assert_eq!(binomial(2, 3), 0);
    }

    #[test]
    fn test_bernstein_partition_of_unity() {
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let s3: f64 = (0..=3).map(|i| bernstein(i, 3, t)).sum();
            let s2: f64 = (0..=2).map(|i| bernstein(i, 2, t)).sum();
            assert!((s3 - 1.0).abs() < 1e-12);
            assert!((s2 - 1.0).abs() < 1e-12);
        }
        assert_eq!(bernstein(0, 3, 0.0), 1.0);
        assert_eq!(bernstein(3, 3, 1.0), 1.0);
        assert!((bernstein(1, 3, 0.5) - 0.375).abs() < 1e-12);
    }
}
