//! Reflection and refraction helpers on top of glam.

use crate::Vec3;

/// Normalize a vector.
///
/// A zero-length input yields NaN components; callers are expected to never
/// pass one on the hot path.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Reflect `v` about the normal `n`: `v - 2·dot(v,n)·n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` (pointing against `v`),
/// where `ni_over_nt` is the ratio of refractive indices.
///
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f64) -> Option<Vec3> {
    let uv = unit_vector(v);
    let cos_theta = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - cos_theta * cos_theta);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * cos_theta) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation of Fresnel reflectance.
#[inline]
pub fn schlick(cosine: f64, ni: f64, nt: f64) -> f64 {
    let r0 = ((ni - nt) / (ni + nt)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
