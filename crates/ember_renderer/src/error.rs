//! Render errors.

use thiserror::Error;

/// Errors that stop a render before any pixel is produced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render region {row_min}..{row_max} x {col_min}..{col_max} is empty")]
    EmptyRegion {
        row_min: u32,
        row_max: u32,
        col_min: u32,
        col_max: u32,
    },

    #[error("Render region {row_min}..{row_max} x {col_min}..{col_max} exceeds the {width}x{height} image")]
    RegionOutOfBounds {
        row_min: u32,
        row_max: u32,
        col_min: u32,
        col_max: u32,
        width: u32,
        height: u32,
    },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
