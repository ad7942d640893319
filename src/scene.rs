//! Per-frame scene snapshot shared read-only by every fill task.

use std::sync::Arc;

use crate::basics::PointD;
use crate::bezier_surface::{BezierPatch, SurfaceSample};
use crate::color::Rgba8;
use crate::image_accessors::ImageSource;
use crate::light::LightState;
use crate::span_phong::ShadingParams;

// ============================================================================
// Background
// ============================================================================

/// Object color under the lighting: a solid color or an image.
///
/// `use_image` selects the mode. Image mode without an image falls back to
/// the solid color.
#[derive(Debug, Clone)]
pub struct Background {
    pub color: Rgba8,
    pub image: Option<Arc<ImageSource>>,
    pub use_image: bool,
}

impl Background {
    pub fn solid(color: Rgba8) -> Self {
        Self {
            color,
            image: None,
            use_image: false,
        }
    }

    pub fn with_image(color: Rgba8, image: Arc<ImageSource>) -> Self {
        Self {
            color,
            image: Some(image),
            use_image: true,
        }
    }

    /// Image pixel at (x, y) when image mode is active and an image is set.
    #[inline]
    pub fn image_at(&self, x: i32, y: i32) -> Option<Rgba8> {
        if !self.use_image {
            return None;
        }
        self.image.as_ref().map(|img| img.pixel(x, y))
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::solid(Rgba8::WHITE)
    }
}

// ============================================================================
// SceneSnapshot
// ============================================================================

/// Everything a frame reads besides the mesh, captured when the frame starts.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub light: LightState,
    pub shading: ShadingParams,
    pub background: Background,
    pub normal_map: Option<Arc<ImageSource>>,
    pub show_mesh: bool,
    /// Clear color of the raster before any triangle is filled.
    pub clear_color: Rgba8,
    pub border_color: Rgba8,
}

impl SceneSnapshot {
    pub fn new(light: LightState, shading: ShadingParams) -> Self {
        Self {
            light,
            shading,
            background: Background::default(),
            normal_map: None,
            show_mesh: false,
            clear_color: Rgba8::BLACK,
            border_color: Rgba8::BLACK,
        }
    }
}

// ============================================================================
// ShadingContext
// ============================================================================

/// A snapshot plus the surface patch and raster size for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ShadingContext<'a> {
    pub scene: &'a SceneSnapshot,
    pub patch: BezierPatch,
    pub width: f64,
    pub height: f64,
}

impl<'a> ShadingContext<'a> {
    pub fn new(scene: &'a SceneSnapshot, patch: BezierPatch, width: u32, height: u32) -> Self {
        Self {
            scene,
            patch,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Surface normal and height under raster point `p`.
    pub fn vertex_sample(&self, p: PointD) -> SurfaceSample {
        self.patch.sample(p.x / self.width, p.y / self.height)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier_surface::HeightGrid;
    use crate::math::Vec3;

    #[test]
    fn test_background_modes() {
        let img = Arc::new(ImageSource::solid(4, 4, Rgba8::BLUE).unwrap());
        let mut bg = Background::with_image(Rgba8::WHITE, img);
        assert_eq!(bg.image_at(1, 1), Some(Rgba8::BLUE));
        // Lookups outside the image clamp to its edge.
        assert_eq!(bg.image_at(100, -3), Some(Rgba8::BLUE));

        bg.use_image = false;
        assert_eq!(bg.image_at(1, 1), None);

        let no_image = Background {
            color: Rgba8::WHITE,
            image: None,
            use_image: true,
        };
        assert_eq!(no_image.image_at(0, 0), None);
    }

    #[test]
    fn test_vertex_sample_maps_raster_to_unit_square() {
        let mut grid = HeightGrid::new(4);
        grid.set(3, 0, 100.0);
        let scene = SceneSnapshot::new(
            LightState::new(PointD::new(0.0, 0.0), 100.0, Rgba8::WHITE),
            ShadingParams::default(),
        );
        let ctx = ShadingContext::new(&scene, grid.patch(), 200, 50);
        let s = ctx.vertex_sample(PointD::new(200.0, 0.0));
        assert!((s.height - 1.0).abs() < 1e-12);
        let s = ctx.vertex_sample(PointD::new(0.0, 50.0));
        assert_eq!(s.height, 0.0);
        assert!(s.normal.approx_eq(Vec3::Z, 1e-12));
    }
}
