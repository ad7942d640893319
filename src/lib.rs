//! # bezier-shade
//!
//! Scanline rasterizer and per-pixel Phong shader for a bicubic Bézier
//! height-field drawn top-down over a fixed raster.
//!
//! A frame is produced in these stages:
//!
//! 1. **Mesh**: control-point grid with heights, split into triangles
//! 2. **Surface**: the Bézier patch gives each triangle vertex a normal and height
//! 3. **Scanline fill**: an active-edge table walks every triangle, one rayon task each
//! 4. **Shading**: Phong lighting per covered pixel, optionally normal-mapped
//! 5. **Overlays**: wireframe, control-point and light markers, border
//!
//! ```no_run
//! use bezier_shade::{FrameComposer, RenderConfig};
//!
//! let config = RenderConfig::default();
//! let mesh = config.mesh().unwrap();
//! let frame = FrameComposer::new().render(&mesh, &config.scene());
//! assert_eq!(frame.width(), 600);
//! ```

// Foundation types & math
pub mod basics;
pub mod color;
pub mod error;
pub mod math;

// Surface & scene
pub mod bezier_surface;
pub mod config;
pub mod light;
pub mod mesh;
pub mod scene;

// Pixel storage & renderers
pub mod image_accessors;
pub mod pixfmt_rgba;
pub mod renderer_base;
pub mod renderer_primitives;
pub mod rendering_buffer;

// Rasterizers & shading
pub mod frame_composer;
pub mod rasterizer_outline;
pub mod rasterizer_scanline;
pub mod span_phong;

pub use basics::{PointD, Triangle};
pub use color::Rgba8;
pub use config::RenderConfig;
pub use error::{Result, ShadeError};
pub use frame_composer::{FrameComposer, FrameGate};
pub use image_accessors::ImageSource;
pub use light::{LightSpiral, LightState};
pub use mesh::Mesh;
pub use rendering_buffer::RenderingBuffer;
pub use scene::{Background, SceneSnapshot};
pub use span_phong::ShadingParams;
