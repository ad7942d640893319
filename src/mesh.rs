//! Control-point mesh and its triangulation.
//!
//! An N×N grid of control points spread evenly over the raster, each with an
//! editable height. Every grid cell is split into `subdivision²` squares and
//! every square into two triangles. The triangle list is rebuilt wholesale
//! whenever the subdivision factor changes and is never edited in place.

use crate::basics::{PointD, Triangle};
use crate::bezier_surface::HeightGrid;
use crate::error::{Result, ShadeError};

/// Radius in pixels within which a click selects a control point.
pub const PICK_RADIUS: f64 = 8.0;

// ============================================================================
// Mesh
// ============================================================================

/// Control points, their heights, the current triangulation and selection.
///
/// The selection is a `(row, col)` index: two control points with equal
/// coordinates are still distinct. Row follows the raster X axis.
#[derive(Debug, Clone)]
pub struct Mesh {
    size: usize,
    subdivision: usize,
    width: u32,
    height: u32,
    heights: HeightGrid,
    triangles: Vec<Triangle>,
    selected: Option<(usize, usize)>,
}

impl Mesh {
    /// Build a `size`×`size` mesh over a `width`×`height` raster.
    pub fn new(size: usize, subdivision: usize, width: u32, height: u32) -> Result<Self> {
        if size < 2 {
            return Err(ShadeError::GridTooSmall(size));
        }
        if subdivision == 0 {
            return Err(ShadeError::ZeroSubdivision);
        }
        if width == 0 || height == 0 {
            return Err(ShadeError::EmptyRaster { width, height });
        }
        let mut mesh = Self {
            size,
            subdivision,
            width,
            height,
            heights: HeightGrid::new(size),
            triangles: Vec::new(),
            selected: None,
        };
        mesh.triangles = mesh.build_triangles();
        Ok(mesh)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn subdivision(&self) -> usize {
        self.subdivision
    }

    pub fn raster_width(&self) -> u32 {
        self.width
    }

    pub fn raster_height(&self) -> u32 {
        self.height
    }

    pub fn heights(&self) -> &HeightGrid {
        &self.heights
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Change the subdivision factor and rebuild the triangle list.
    pub fn set_subdivision(&mut self, subdivision: usize) -> Result<()> {
        if subdivision == 0 {
            return Err(ShadeError::ZeroSubdivision);
        }
        if subdivision != self.subdivision {
            self.subdivision = subdivision;
            self.triangles = self.build_triangles();
            log::debug!(
                "subdivision {} -> {} triangles",
                subdivision,
                self.triangles.len()
            );
        }
        Ok(())
    }

    /// Raster position of control point (row, col).
    pub fn control_point(&self, row: usize, col: usize) -> PointD {
        let last = (self.size - 1) as f64;
        PointD::new(
            self.width as f64 * row as f64 / last,
            self.height as f64 * col as f64 / last,
        )
    }

    /// All control points with their indices, row-major.
    pub fn control_points(&self) -> impl Iterator<Item = ((usize, usize), PointD)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size).map(move |col| ((row, col), self.control_point(row, col)))
        })
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.size || col >= self.size {
            return Err(ShadeError::PointOutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    pub fn set_height(&mut self, row: usize, col: usize, h: f64) -> Result<()> {
        self.check_index(row, col)?;
        self.heights.set(row, col, h);
        Ok(())
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    pub fn select(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_index(row, col)?;
        self.selected = Some((row, col));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select the control point within [`PICK_RADIUS`] of `at`.
    ///
    /// When several are in range the last one in row-major order wins. A miss
    /// leaves the current selection unchanged.
    pub fn pick(&mut self, at: PointD) -> Option<(usize, usize)> {
        let hit = self
            .control_points()
            .filter(|(_, p)| p.distance(&at) <= PICK_RADIUS)
            .map(|(idx, _)| idx)
            .last();
        if hit.is_some() {
            self.selected = hit;
        }
        hit
    }

    /// Height of the selected control point.
    pub fn selected_height(&self) -> Option<f64> {
        self.selected.map(|(r, c)| self.heights.get(r, c))
    }

    /// Set the height of the selected control point. Returns `false` when
    /// nothing is selected.
    pub fn set_selected_height(&mut self, h: f64) -> bool {
        match self.selected {
            Some((r, c)) => {
                self.heights.set(r, c, h);
                true
            }
            None => false,
        }
    }

    fn build_triangles(&self) -> Vec<Triangle> {
        let steps = (self.size - 1) * self.subdivision;
        let lattice = |gx: usize, gy: usize| {
            PointD::new(
                self.width as f64 * gx as f64 / steps as f64,
                self.height as f64 * gy as f64 / steps as f64,
            )
        };
        let mut triangles = Vec::with_capacity(2 * steps * steps);
        for i in 0..self.size - 1 {
            for j in 0..self.size - 1 {
                for m in 0..self.subdivision {
                    for n in 0..self.subdivision {
                        let gx = i * self.subdivision + m;
                        let gy = j * self.subdivision + n;
                        triangles.push(Triangle::new(
                            lattice(gx, gy),
                            lattice(gx + 1, gy),
                            lattice(gx, gy + 1),
                        ));
                        triangles.push(Triangle::new(
                            lattice(gx + 1, gy),
                            lattice(gx + 1, gy + 1),
                            lattice(gx, gy + 1),
                        ));
                    }
                }
            }
        }
        triangles
    }
}

// ============================================================================
// Tests
// ============================================================================
