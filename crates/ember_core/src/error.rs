//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating a scene description.
///
/// All of these are fatal: they are reported before any pixel is rendered.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Got invalid surface type: {0}")]
    UnknownSurfaceType(String),

    #[error("Sphere {index}: {message}")]
    InvalidSphere { index: usize, message: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid image settings: {0}")]
    InvalidImage(String),

    #[error("Patch {patch:?} does not fit a {width}x{height} image")]
    InvalidPatch {
        patch: [u32; 4],
        width: u32,
        height: u32,
    },
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;
