//! Light state and the spiral animation that drives it.

use crate::basics::PointD;
use crate::color::Rgba8;

// ============================================================================
// LightState
// ============================================================================

/// Point light above the raster plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    pub position: PointD,
    pub height: f64,
    pub color: Rgba8,
}

impl LightState {
    pub fn new(position: PointD, height: f64, color: Rgba8) -> Self {
        Self {
            position,
            height,
            color,
        }
    }
}

// ============================================================================
// LightSpiral
// ============================================================================

/// Moves the light along a spiral around the raster centre.
///
/// Every tick the radius grows (or shrinks) by `radius_delta` and the angle
/// advances by `angle_delta`. The radius turns around once it reaches
/// `min_radius` or `max_radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSpiral {
    center: PointD,
    min_radius: f64,
    max_radius: f64,
    radius_delta: f64,
    angle_delta: f64,
    radius: f64,
    angle: f64,
    growing: bool,
}

impl LightSpiral {
    pub fn new(
        center: PointD,
        min_radius: f64,
        max_radius: f64,
        radius_delta: f64,
        angle_delta: f64,
    ) -> Self {
        Self {
            center,
            min_radius,
            max_radius,
            radius_delta,
            angle_delta,
            radius: min_radius,
            angle: 0.0,
            growing: true,
        }
    }

    /// Spiral centred on a `width`×`height` raster, reaching half its width.
    pub fn for_raster(
        width: u32,
        height: u32,
        min_radius: f64,
        radius_delta: f64,
        angle_delta: f64,
    ) -> Self {
        Self::new(
            PointD::new(width as f64 / 2.0, height as f64 / 2.0),
            min_radius,
            width as f64 / 2.0,
            radius_delta,
            angle_delta,
        )
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advance radius and angle by one step.
    pub fn tick(&mut self) {
        if self.growing {
            self.radius += self.radius_delta;
        } else {
            self.radius -= self.radius_delta;
        }
        if self.radius <= self.min_radius || self.radius >= self.max_radius {
            self.growing = !self.growing;
        }
        self.angle += self.angle_delta;
    }

    /// Current light position.
    pub fn position(&self) -> PointD {
        PointD::new(
            self.center.x + self.radius * self.angle.sin(),
            self.center.y + self.radius * self.angle.cos(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
