//! Ember Core - scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene file types**: `RenderSpec` and its settings, image,
//!   camera and sphere sections, deserialized from JSON
//! - **Validation**: every configuration error is reported before rendering
//!
//! The renderer turns a validated `SceneSpec` into its own scene
//! representation; nothing here knows how pixels are computed.
//!
//! # Example
//!
//! ```ignore
//! use ember_core::load_spec;
//!
//! let spec = load_spec("sample_world.json")?;
//! println!("{} spheres", spec.scene.objects.spheres.len());
//! ```

pub mod error;
pub mod loader;
pub mod spec;

pub use error::{SceneError, SceneResult};
pub use loader::{load_spec, load_spec_from_str};
pub use spec::{
    CameraSpec, ImageSpec, ObjectsSpec, RenderSpec, SceneSpec, Settings, SphereSpec, SurfaceKind,
    SurfaceSpec, DEFAULT_RENDER_DEPTH, MAX_IMAGE_PIXELS,
};
