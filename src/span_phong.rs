//! Per-pixel Phong shading over a triangle.
//!
//! Vertex normals and heights come from the Bézier patch. For every covered
//! pixel the normal and height are interpolated with the pixel's barycentric
//! weights, optionally perturbed by a tangent-space normal map, and then lit:
//!
//! ```text
//! I = min(255, IL * IO * (kd * cos(N, L) + ks * cos(V, R)^m) * 255)
//! ```
//!
//! The view vector is fixed at +Z (orthographic, looking straight down).

use crate::bezier_surface::{SurfaceSample, HEIGHT_SCALE};
use crate::color::{Rgba, Rgba8};
use crate::light::LightState;
use crate::math::Vec3;

/// Direction towards the viewer.
pub const VIEW: Vec3 = Vec3::Z;

// ============================================================================
// ShadingParams
// ============================================================================

/// Lighting coefficients: diffuse `kd`, specular `ks`, shininess `m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    pub kd: f64,
    pub ks: f64,
    pub m: f64,
}

impl ShadingParams {
    /// Build with `kd`, `ks` clamped to [0, 1] and `m` to at least 1.
    pub fn new(kd: f64, ks: f64, m: f64) -> Self {
        Self {
            kd: kd.clamp(0.0, 1.0),
            ks: ks.clamp(0.0, 1.0),
            m: m.max(1.0),
        }
    }
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self::new(0.5, 0.5, 10.0)
    }
}

// ============================================================================
// Normal maps
// ============================================================================

/// Decode a normal-map texel: x, y in [-1, 1] and z in [0, 1].
#[inline]
pub fn normal_from_color(c: Rgba8) -> Vec3 {
    let c = Rgba::from(c);
    Vec3::new((c.r - 0.5) * 2.0, (c.g - 0.5) * 2.0, c.b)
}

/// Tangent and binormal for surface normal `n`.
///
/// The binormal is perpendicular to `n` and +Z; for `n` exactly +Z that cross
/// product vanishes, so the binormal is +Y instead.
pub fn tangent_frame(n: Vec3) -> (Vec3, Vec3) {
    let binormal = if n == Vec3::Z {
        Vec3::Y
    } else {
        n.cross(Vec3::Z).normalize()
    };
    let tangent = binormal.cross(n).normalize();
    (tangent, binormal)
}

/// Re-express a tangent-space normal in the (tangent, binormal, normal) frame
/// of `n`. The map's Y axis points down the texture, so it is flipped.
pub fn perturb_normal(n: Vec3, map: Vec3) -> Vec3 {
    let (tangent, binormal) = tangent_frame(n);
    Vec3::add3(tangent * map.x, binormal * -map.y, n * map.z).normalize()
}

// ============================================================================
// PhongShader
// ============================================================================

/// Shades pixels of one triangle.
#[derive(Debug, Clone, Copy)]
pub struct PhongShader {
    light: LightState,
    light_color: Rgba,
    params: ShadingParams,
    vertices: [SurfaceSample; 3],
}

impl PhongShader {
    pub fn new(light: LightState, params: ShadingParams, vertices: [SurfaceSample; 3]) -> Self {
        Self {
            light,
            light_color: Rgba::from(light.color),
            params,
            vertices,
        }
    }

    /// Interpolated unit normal and (patch-unit) height at `weights`.
    pub fn interpolate(&self, weights: [f64; 3]) -> (Vec3, f64) {
        let [v0, v1, v2] = self.vertices;
        let n = Vec3::add3(
            v0.normal * weights[0],
            v1.normal * weights[1],
            v2.normal * weights[2],
        )
        .normalize();
        let z = v0.height * weights[0] + v1.height * weights[1] + v2.height * weights[2];
        (n, z)
    }

    /// Color of pixel (x, y) with barycentric `weights` over the triangle,
    /// lit on top of `object`, optionally perturbed by a normal-map vector.
    pub fn shade(
        &self,
        x: f64,
        y: f64,
        weights: [f64; 3],
        object: Rgba8,
        normal_map: Option<Vec3>,
    ) -> Rgba8 {
        let (mut n, mut z) = self.interpolate(weights);
        if let Some(map) = normal_map {
            n = perturb_normal(n, map);
            z += map.z;
        }
        z *= HEIGHT_SCALE;

        let l = Vec3::new(
            self.light.position.x - x,
            self.light.position.y - y,
            self.light.height - z,
        )
        .normalize();
        self.lit(n, l, Rgba::from(object))
    }

    /// Phong reflection for normal `n`, light direction `l` and object color.
    pub fn lit(&self, n: Vec3, l: Vec3, object: Rgba) -> Rgba8 {
        let n_dot_l = n.dot(l);
        let r = (n * (2.0 * n_dot_l) - l).normalize();

        let cos_nl = n_dot_l.max(0.0);
        let cos_vr = VIEW.dot(r).max(0.0);

        let diffuse = self.params.kd * cos_nl * 255.0;
        let specular = self.params.ks * cos_vr.powf(self.params.m) * 255.0;

        let channel = |il: f64, io: f64| -> u8 {
            (il * io * diffuse + il * io * specular).min(255.0) as u8
        };
        Rgba8::new(
            channel(self.light_color.r, object.r),
            channel(self.light_color.g, object.g),
            channel(self.light_color.b, object.b),
            255,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
