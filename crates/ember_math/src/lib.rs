//! Ember math types.
//!
//! Double precision throughout: the renderer works with large ground spheres
//! and a small self-intersection epsilon, which single precision cannot
//! resolve reliably.

// Re-export the glam f64 vector under the names the renderer uses
pub use glam::DVec3 as Vec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract, schlick, unit_vector};

/// Linear RGB color. Same representation as a vector.
pub type Color = Vec3;
