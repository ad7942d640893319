//! TOML render configuration.
//!
//! ```toml
//! [ui]
//! background_color = [30, 30, 30, 255]
//! border_color = [255, 255, 255, 255]
//! raster_width = 600
//! raster_height = 600
//!
//! [defaults]
//! kd = 0.5
//! ks = 0.5
//! m = 10.0
//! light_color = [255, 255, 255, 255]
//! light_animation = true
//! light_height = 200.0
//! background_color = [255, 255, 255, 255]
//! triangulation = 5
//! points_per_side = 4
//!
//! [light]
//! spiral_min_radius = 10.0
//! spiral_radius_delta = 2.0
//! spiral_angle_delta = 0.1
//! spiral_update_ms = 30
//! ```
//!
//! Every key is optional; missing keys take the values above.

use std::path::Path;

use serde::Deserialize;

use crate::basics::PointD;
use crate::color::Rgba8;
use crate::error::{Result, ShadeError};
use crate::light::{LightSpiral, LightState};
use crate::mesh::Mesh;
use crate::scene::{Background, SceneSnapshot};
use crate::span_phong::ShadingParams;

pub const MAX_SHININESS: f64 = 100.0;

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Raster clear color.
    pub background_color: [u8; 4],
    pub border_color: [u8; 4],
    pub raster_width: u32,
    pub raster_height: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 30, 255],
            border_color: [255, 255, 255, 255],
            raster_width: 600,
            raster_height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub kd: f64,
    pub ks: f64,
    pub m: f64,
    pub light_color: [u8; 4],
    pub light_animation: bool,
    pub light_height: f64,
    /// Solid object color.
    pub background_color: [u8; 4],
    /// Squares per mesh cell side.
    pub triangulation: usize,
    /// Control points per mesh side.
    pub points_per_side: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            kd: 0.5,
            ks: 0.5,
            m: 10.0,
            light_color: [255, 255, 255, 255],
            light_animation: true,
            light_height: 200.0,
            background_color: [255, 255, 255, 255],
            triangulation: 5,
            points_per_side: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub spiral_min_radius: f64,
    pub spiral_radius_delta: f64,
    pub spiral_angle_delta: f64,
    pub spiral_update_ms: u64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            spiral_min_radius: 10.0,
            spiral_radius_delta: 2.0,
            spiral_angle_delta: 0.1,
            spiral_update_ms: 30,
        }
    }
}

// ============================================================================
// RenderConfig
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub ui: UiConfig,
    pub defaults: DefaultsConfig,
    pub light: LightConfig,
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut config: RenderConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ShadeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Clamp shading coefficients into range and reject unusable geometry.
    pub fn validate(&mut self) -> Result<()> {
        let d = &mut self.defaults;
        d.kd = clamp_warn("kd", d.kd, 0.0, 1.0);
        d.ks = clamp_warn("ks", d.ks, 0.0, 1.0);
        d.m = clamp_warn("m", d.m, 1.0, MAX_SHININESS);

        if self.ui.raster_width == 0 || self.ui.raster_height == 0 {
            return Err(ShadeError::EmptyRaster {
                width: self.ui.raster_width,
                height: self.ui.raster_height,
            });
        }
        if d.points_per_side < 2 {
            return Err(ShadeError::GridTooSmall(d.points_per_side));
        }
        if d.triangulation == 0 {
            return Err(ShadeError::ZeroSubdivision);
        }
        Ok(())
    }

    pub fn mesh(&self) -> Result<Mesh> {
        Mesh::new(
            self.defaults.points_per_side,
            self.defaults.triangulation,
            self.ui.raster_width,
            self.ui.raster_height,
        )
    }

    pub fn shading(&self) -> ShadingParams {
        ShadingParams::new(self.defaults.kd, self.defaults.ks, self.defaults.m)
    }

    /// Light at the raster centre.
    pub fn light_state(&self) -> LightState {
        LightState::new(
            PointD::new(
                self.ui.raster_width as f64 / 2.0,
                self.ui.raster_height as f64 / 2.0,
            ),
            self.defaults.light_height,
            Rgba8::from(self.defaults.light_color),
        )
    }

    pub fn spiral(&self) -> LightSpiral {
        LightSpiral::for_raster(
            self.ui.raster_width,
            self.ui.raster_height,
            self.light.spiral_min_radius,
            self.light.spiral_radius_delta,
            self.light.spiral_angle_delta,
        )
    }

    /// Initial scene: light at the centre over the solid background.
    pub fn scene(&self) -> SceneSnapshot {
        let mut scene = SceneSnapshot::new(self.light_state(), self.shading());
        scene.background = Background::solid(Rgba8::from(self.defaults.background_color));
        scene.clear_color = Rgba8::from(self.ui.background_color);
        scene.border_color = Rgba8::from(self.ui.border_color);
        scene
    }
}

fn clamp_warn(name: &str, v: f64, lo: f64, hi: f64) -> f64 {
    let c = if v.is_nan() { lo } else { v.clamp(lo, hi) };
    if c != v {
        log::warn!("{} = {} out of range [{}, {}], using {}", name, v, lo, hi, c);
    }
    c
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(config, RenderConfig::default());
        let mesh = config.mesh().unwrap();
        assert_eq!(mesh.size(), 4);
        assert_eq!(mesh.triangles().len(), 3 * 3 * 5 * 5 * 2);
    }

    #[test]
    fn test_partial_sections() {
        let config = RenderConfig::from_toml_str(
            r#"
            [ui]
            raster_width = 320
            raster_height = 200

            [defaults]
            kd = 0.8
            light_color = [255, 0, 0, 255]
            points_per_side = 2
            triangulation = 1

            [light]
            spiral_update_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.raster_width, 320);
        assert_eq!(config.ui.border_color, [255, 255, 255, 255]);
        assert_eq!(config.defaults.kd, 0.8);
        assert_eq!(config.defaults.ks, 0.5);
        assert_eq!(config.light.spiral_update_ms, 50);

        let light = config.light_state();
        assert_eq!(light.position, PointD::new(160.0, 100.0));
        assert_eq!(light.color, Rgba8::new(255, 0, 0, 255));
        assert_eq!(config.mesh().unwrap().triangles().len(), 2);
    }

    #[test]
    fn test_shading_values_are_clamped() {
        let config = RenderConfig::from_toml_str(
            r#"
            [defaults]
            kd = 1.5
            ks = -0.25
            m = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.kd, 1.0);
        assert_eq!(config.defaults.ks, 0.0);
        assert_eq!(config.defaults.m, 1.0);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert!(matches!(
            RenderConfig::from_toml_str("[defaults]\npoints_per_side = 1"),
            Err(ShadeError::GridTooSmall(1))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("[defaults]\ntriangulation = 0"),
            Err(ShadeError::ZeroSubdivision)
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("[ui]\nraster_width = 0"),
            Err(ShadeError::EmptyRaster { .. })
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            RenderConfig::from_toml_str("[ui]\nraster_width = \"wide\""),
            Err(ShadeError::Config(_))
        ));
        assert!(matches!(
            RenderConfig::from_toml_str("[ui]\nraster_depth = 3"),
            Err(ShadeError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = RenderConfig::load("/nonexistent/bezier-shade.toml").unwrap_err();
        assert!(matches!(err, ShadeError::Io { .. }));
        assert!(err.to_string().contains("bezier-shade.toml"));
    }

    #[test]
    fn test_scene_from_config() {
        let config = RenderConfig::default();
        let scene = config.scene();
        assert_eq!(scene.clear_color, Rgba8::new(30, 30, 30, 255));
        assert_eq!(scene.background.color, Rgba8::WHITE);
        assert!(!scene.background.use_image);
        assert_eq!(scene.shading, ShadingParams::new(0.5, 0.5, 10.0));
        assert_eq!(config.spiral().position(), PointD::new(300.0, 310.0));
    }
}
