//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius is expected to be positive.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn record_at(&self, ray: &Ray, t: f64) -> HitRecord<'_> {
        let p = ray.at(t);
        HitRecord {
            t,
            p,
            normal: (p - self.center) / self.radius,
            material: &self.material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        // Tangent rays count as a miss
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let near = (-b - sqrtd) / (2.0 * a);
        if ray_t.surrounds(near) {
            return Some(self.record_at(ray, near));
        }
        let far = (-b + sqrtd) / (2.0 * a);
        if ray_t.surrounds(far) {
            return Some(self.record_at(ray, far));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::Color;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Lambertian::new(Color::splat(0.5)).into(),
        )
    }

    const FORWARD: Interval = Interval::new(0.001, f64::INFINITY);

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, FORWARD).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12); // Should hit at t=0.5
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_tangent_ray_is_a_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_inside_hit_uses_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z);

        let rec = sphere.hit(&ray, FORWARD).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
        // Normal stays outward even when hit from inside
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_range_is_exclusive() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Near root is exactly t_max: rejected, and the far root is beyond it
        assert!(sphere.hit(&ray, Interval::new(0.001, 0.5)).is_none());
        // Near root exactly t_min: falls through to the far root
        let rec = sphere.hit(&ray, Interval::new(0.5, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_hit_point_lies_on_sphere() {
        let mut rng = StdRng::seed_from_u64(11);
        let sphere = Sphere::new(
            Vec3::new(0.3, -0.2, -4.0),
            1.25,
            Lambertian::new(Color::ONE).into(),
        );

        let mut hits = 0;
        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-1.0..3.0),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-2.0..0.0),
            );
            let ray = Ray::new(origin, direction);
            if let Some(rec) = sphere.hit(&ray, FORWARD) {
                hits += 1;
                assert!(FORWARD.surrounds(rec.t));
                assert!(((ray.at(rec.t) - sphere.center()).length() - sphere.radius()).abs() < 1e-9);
                assert!((rec.normal.length() - 1.0).abs() < 1e-9);
            }
        }
        assert!(hits > 0);
    }
}
