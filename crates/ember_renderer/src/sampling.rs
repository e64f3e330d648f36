//! Random sampling helpers.
//!
//! Every function takes the caller's generator. Workers each own one, so
//! nothing here touches shared state.

use ember_math::Vec3;
use rand::Rng;

/// Uniform f64 in [0, 1).
#[inline]
pub(crate) fn gen_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Random point strictly inside the unit sphere (rejection sampled).
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            2.0 * gen_f64(rng) - 1.0,
            2.0 * gen_f64(rng) - 1.0,
            2.0 * gen_f64(rng) - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random point strictly inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(2.0 * gen_f64(rng) - 1.0, 2.0 * gen_f64(rng) - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
