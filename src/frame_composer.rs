//! Frame composition.
//!
//! One frame is built in passes over a fresh [`RenderingBuffer`]:
//!
//! 1. clear to the scene's clear color
//! 2. shade every mesh triangle, one rayon task per triangle
//! 3. optionally stroke the triangulation, again one task per triangle
//! 4. control-point markers, the light marker and a one-pixel border
//!
//! Each parallel pass returns only after all of its tasks finished. Tasks
//! share the buffer through its atomic pixels; where neighbouring triangles
//! touch the same pixel the last write wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::color::Rgba8;
use crate::mesh::Mesh;
use crate::pixfmt_rgba::PixfmtRgba32;
use crate::rasterizer_outline::{PrimitivesPen, RasterizerOutline};
use crate::rasterizer_scanline::fill_polygon;
use crate::renderer_base::RendererBase;
use crate::renderer_primitives::RendererPrimitives;
use crate::rendering_buffer::RenderingBuffer;
use crate::scene::{SceneSnapshot, ShadingContext};

/// Radius in pixels of the control-point and light markers.
pub const MARKER_RADIUS: i32 = 8;

pub const WIREFRAME_COLOR: Rgba8 = Rgba8::BLUE;
pub const SELECTED_POINT_COLOR: Rgba8 = Rgba8::BLUE;
pub const CONTROL_POINT_COLOR: Rgba8 = Rgba8::WHITE;
pub const LIGHT_MARKER_COLOR: Rgba8 = Rgba8::YELLOW;

// ============================================================================
// FrameGate
// ============================================================================

/// "Frame in flight" flag.
///
/// A periodic driver calls [`try_enter`](Self::try_enter) before starting a
/// frame and skips the redraw when another frame still holds the gate.
#[derive(Debug, Default)]
pub struct FrameGate {
    busy: AtomicBool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_enter(&self) -> Option<FrameGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| FrameGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds a [`FrameGate`] closed until dropped.
#[derive(Debug)]
pub struct FrameGuard<'a> {
    gate: &'a FrameGate,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

// ============================================================================
// FrameComposer
// ============================================================================

#[derive(Debug, Default)]
pub struct FrameComposer {
    gate: FrameGate,
}

impl FrameComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self) -> &FrameGate {
        &self.gate
    }

    /// Render a frame unless one is already in flight.
    pub fn try_render(&self, mesh: &Mesh, scene: &SceneSnapshot) -> Option<RenderingBuffer> {
        let Some(_guard) = self.gate.try_enter() else {
            log::debug!("frame in flight, skipping redraw");
            return None;
        };
        Some(self.render(mesh, scene))
    }

    /// Render a complete frame of the mesh's raster size.
    pub fn render(&self, mesh: &Mesh, scene: &SceneSnapshot) -> RenderingBuffer {
        let start = Instant::now();
        let buf = RenderingBuffer::new(mesh.raster_width(), mesh.raster_height());
        RendererBase::new(PixfmtRgba32::new(&buf)).clear(&scene.clear_color);

        let filled = self.fill_triangles(&buf, mesh, scene);
        let fill_time = start.elapsed();

        if scene.show_mesh {
            self.draw_wireframe(&buf, mesh);
        }
        self.draw_markers(&buf, mesh, scene);
        self.draw_border(&buf, scene.border_color);

        log::debug!(
            "frame {}x{}: {} triangles, {} pixels shaded, fill {:?}, total {:?}",
            buf.width(),
            buf.height(),
            mesh.triangles().len(),
            filled,
            fill_time,
            start.elapsed()
        );
        buf
    }

    /// Shade every triangle into `buf` concurrently. Returns the number of
    /// pixel writes.
    pub fn fill_triangles(&self, buf: &RenderingBuffer, mesh: &Mesh, scene: &SceneSnapshot) -> usize {
        let ctx = ShadingContext::new(
            scene,
            mesh.heights().patch(),
            mesh.raster_width(),
            mesh.raster_height(),
        );
        mesh.triangles()
            .par_iter()
            .map(|tri| {
                let mut ren = RendererBase::new(PixfmtRgba32::new(buf));
                fill_polygon(&tri.points(), scene.background.color, &mut ren, &ctx)
            })
            .sum()
    }

    /// Stroke every triangle's edges concurrently.
    pub fn draw_wireframe(&self, buf: &RenderingBuffer, mesh: &Mesh) {
        mesh.triangles().par_iter().for_each(|tri| {
            let mut ren = RendererBase::new(PixfmtRgba32::new(buf));
            let mut prim = RendererPrimitives::new(&mut ren);
            let mut pen = PrimitivesPen::new(&mut prim);
            RasterizerOutline::new(&mut pen)
                .render_triangles(std::slice::from_ref(tri), WIREFRAME_COLOR);
        });
    }

    /// Control-point discs (selected one highlighted) and the light disc.
    pub fn draw_markers(&self, buf: &RenderingBuffer, mesh: &Mesh, scene: &SceneSnapshot) {
        let mut ren = RendererBase::new(PixfmtRgba32::new(buf));
        let mut prim = RendererPrimitives::new(&mut ren);
        let selected = mesh.selected();
        for (idx, p) in mesh.control_points() {
            let color = if Some(idx) == selected {
                SELECTED_POINT_COLOR
            } else {
                CONTROL_POINT_COLOR
            };
            prim.set_fill_color(color);
            disc(&mut prim, p.x, p.y);
        }
        prim.set_fill_color(LIGHT_MARKER_COLOR);
        disc(&mut prim, scene.light.position.x, scene.light.position.y);
    }

    pub fn draw_border(&self, buf: &RenderingBuffer, color: Rgba8) {
        let mut ren = RendererBase::new(PixfmtRgba32::new(buf));
        let (w, h) = (ren.width() as i32, ren.height() as i32);
        let mut prim = RendererPrimitives::new(&mut ren);
        prim.set_line_color(color);
        prim.rectangle(0, 0, w - 1, h - 1);
    }
}

fn disc(prim: &mut RendererPrimitives<'_, PixfmtRgba32<'_>>, x: f64, y: f64) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    prim.solid_ellipse(x.floor() as i32, y.floor() as i32, MARKER_RADIUS, MARKER_RADIUS);
}

// ============================================================================
// Tests
// ============================================================================
