//! Bicubic Bézier height-field.
//!
//! The surface is a single cubic patch over the unit square. Its 4×4 control
//! heights come from the first four rows and columns of the mesh's
//! [`HeightGrid`]; smaller grids repeat their last row/column. Heights are
//! divided by [`HEIGHT_SCALE`] when the patch is built, and the shader
//! multiplies interpolated heights back by the same factor before lighting.
//!
//! The first grid index runs along the raster X axis (`u`), the second along
//! the raster Y axis (`v`).

use crate::math::{bernstein, Vec3};

/// Control heights are stored in slider units; the patch works in units of
/// `1 / HEIGHT_SCALE`.
pub const HEIGHT_SCALE: f64 = 100.0;

/// Control points per side of the cubic patch.
pub const PATCH_ORDER: usize = 4;

// ============================================================================
// HeightGrid
// ============================================================================

/// N×N control-point heights, all zero initially.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    size: usize,
    heights: Vec<f64>,
}

impl HeightGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            heights: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Height of control point (row, col). Panics when out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.size && col < self.size);
        self.heights[row * self.size + col]
    }

    /// Set the height of control point (row, col). Panics when out of range.
    pub fn set(&mut self, row: usize, col: usize, h: f64) {
        assert!(row < self.size && col < self.size);
        self.heights[row * self.size + col] = h;
    }

    /// Height with indices clamped into the grid.
    fn get_clamped(&self, row: usize, col: usize) -> f64 {
        let last = self.size.saturating_sub(1);
        self.heights[row.min(last) * self.size + col.min(last)]
    }

    /// Build the cubic patch this grid describes.
    pub fn patch(&self) -> BezierPatch {
        let mut h = [[0.0; PATCH_ORDER]; PATCH_ORDER];
        if self.size == 0 {
            return BezierPatch { h };
        }
        for (i, row) in h.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.get_clamped(i, j) / HEIGHT_SCALE;
            }
        }
        BezierPatch { h }
    }
}

// ============================================================================
// BezierPatch
// ============================================================================

/// Surface normal and height at one parametric location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub normal: Vec3,
    pub height: f64,
}

/// A bicubic Bézier patch with scaled control heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPatch {
    h: [[f64; PATCH_ORDER]; PATCH_ORDER],
}

impl BezierPatch {
    /// Surface height at (u, v).
    pub fn height(&self, u: f64, v: f64) -> f64 {
        let mut z = 0.0;
        for i in 0..4 {
            let bu = bernstein(i as u32, 3, u);
            for j in 0..4 {
                z += self.h[i][j] * bu * bernstein(j as u32, 3, v);
            }
        }
        z
    }

    /// Tangent along u: (1, 0, ∂z/∂u).
    pub fn partial_u(&self, u: f64, v: f64) -> Vec3 {
        let mut z = 0.0;
        for i in 0..3 {
            let bu = bernstein(i as u32, 2, u);
            for j in 0..4 {
                z += (self.h[i + 1][j] - self.h[i][j]) * bu * bernstein(j as u32, 3, v);
            }
        }
        Vec3::new(1.0, 0.0, 3.0 * z)
    }

    /// Tangent along v: (0, 1, ∂z/∂v).
    pub fn partial_v(&self, u: f64, v: f64) -> Vec3 {
        let mut z = 0.0;
        for i in 0..4 {
            let bu = bernstein(i as u32, 3, u);
            for j in 0..3 {
                z += (self.h[i][j + 1] - self.h[i][j]) * bu * bernstein(j as u32, 2, v);
            }
        }
        Vec3::new(0.0, 1.0, 3.0 * z)
    }

    /// Unit surface normal at (u, v).
    pub fn normal(&self, u: f64, v: f64) -> Vec3 {
        self.partial_u(u, v).cross(self.partial_v(u, v)).normalize()
    }

    pub fn sample(&self, u: f64, v: f64) -> SurfaceSample {
        SurfaceSample {
            normal: self.normal(u, v),
            height: self.height(u, v),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
