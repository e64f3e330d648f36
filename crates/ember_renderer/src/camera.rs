//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use crate::Ray;
use ember_core::CameraSpec;
use ember_math::{unit_vector, Vec3};
use rand::Rng;

/// Thin-lens camera.
///
/// Maps normalized image coordinates `(s, t)` in `[0, 1]²` (origin at the
/// lower-left corner) to world-space rays. Immutable once built, so a single
/// camera is shared by every worker.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a new camera.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: image width over height
    /// - `aperture`: lens diameter, 0 for a pinhole
    /// - `focus_dist`: distance to the plane in perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f64,
        aspect: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        // Camera basis; w points backwards, away from the scene
        let w = unit_vector(look_from - look_at);
        let u = unit_vector(vup.cross(w));
        let v = w.cross(u);

        let lower_left_corner = look_from
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        }
    }

    /// Build from a validated scene-file camera section.
    pub fn from_spec(spec: &CameraSpec) -> Self {
        Self::new(
            Vec3::from(spec.look_from),
            Vec3::from(spec.look_at),
            Vec3::from(spec.up_vector),
            spec.field_of_view,
            spec.aspect_ratio,
            spec.aperture,
            spec.focus_distance(),
        )
    }

    /// Generate the ray through image coordinates `(s, t)`.
    ///
    /// With a non-zero aperture the origin is jittered across the lens disk,
    /// which blurs everything off the focus plane.
    pub fn ray_at<R: Rng + ?Sized>(&self, s: f64, t: f64, rng: &mut R) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit vector pointing from the scene back towards the camera.
    pub fn w(&self) -> Vec3 {
        self.w
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }
}
