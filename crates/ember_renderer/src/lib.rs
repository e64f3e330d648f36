//! Ember Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal, glass and
//! emissive materials. Pixels are partitioned statically across a fixed pool
//! of workers, each with its own random source, and delivered either into an
//! image buffer or over a bounded channel as they complete.

mod camera;
mod error;
mod hittable;
mod material;
mod partition;
mod renderer;
mod sampling;
mod scene;
mod scheduler;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList, Surface};
pub use material::{Dielectric, Lambertian, Light, Material, Metal, ScatterResult};
pub use partition::{partition, PixelRegion, WorkList};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render_pixel, Background, ImageBuffer, Pixel,
    RenderConfig, MAX_RENDER_DEPTH, T_MIN,
};
pub use sampling::{random_in_unit_disk, random_in_unit_sphere};
pub use scene::Scene;
pub use scheduler::{default_worker_count, render_streaming, render_to_buffer, RenderReport};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Color, Interval, Ray, Vec3};
