//! Error type for the fallible edges of the crate.
//!
//! Rendering itself never fails; errors come from building meshes with
//! unusable parameters, loading configuration, and decoding images.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShadeError {
    #[error("mesh needs at least 2 control points per side, got {0}")]
    GridTooSmall(usize),

    #[error("subdivision factor must be at least 1")]
    ZeroSubdivision,

    #[error("raster size must be non-zero, got {width}x{height}")]
    EmptyRaster { width: u32, height: u32 },

    #[error("control point ({row}, {col}) is outside a {size}x{size} grid")]
    PointOutOfRange { row: usize, col: usize, size: usize },

    #[error("image buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    ImageSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "image")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ShadeError>;
