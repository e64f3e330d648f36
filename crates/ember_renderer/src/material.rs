//! Surface scattering models.

use crate::sampling::{gen_f64, random_in_unit_sphere};
use crate::{hittable::HitRecord, Ray};
use ember_core::{SceneResult, SurfaceKind, SurfaceSpec};
use ember_math::{reflect, refract, schlick, unit_vector, Color, Vec3};
use rand::Rng;

/// Outcome of a ray hitting a material.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Color multiplier for the bounced ray, or emitted radiance for lights
    pub attenuation: Color,
    /// Continuation ray; `None` stops the path here
    pub scattered: Option<Ray>,
}

/// The closed set of materials a surface can have.
#[derive(Debug, Clone)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    Light(Light),
}

impl Material {
    /// Scatter an incoming ray at the given hit.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut R,
    ) -> ScatterResult {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
            Material::Light(m) => m.scatter(),
        }
    }

    /// True for pure emitters, whose attenuation is their emitted color.
    pub fn is_light(&self) -> bool {
        matches!(self, Material::Light(_))
    }

    pub fn albedo(&self) -> Color {
        match self {
            Material::Lambertian(m) => m.albedo,
            Material::Metal(m) => m.albedo,
            Material::Dielectric(m) => m.albedo,
            Material::Light(m) => m.albedo,
        }
    }

    /// Build from a scene-file surface section.
    ///
    /// Fails on an unrecognized surface type.
    pub fn from_spec(spec: &SurfaceSpec) -> SceneResult<Self> {
        let albedo = Color::from(spec.albedo);
        let material = match spec.kind()? {
            SurfaceKind::Lambertian => Lambertian::new(albedo).into(),
            SurfaceKind::Metal => Metal::new(albedo, spec.fuzz).into(),
            SurfaceKind::Dielectric => Dielectric::new(albedo, spec.ref_index).into(),
            SurfaceKind::Light => Light::new(albedo).into(),
        };
        Ok(material)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    fn scatter<R: Rng + ?Sized>(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut R) -> ScatterResult {
        let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-12 {
            scatter_direction = rec.normal;
        }

        ScatterResult {
            attenuation: self.albedo,
            scattered: Some(Ray::new(rec.p, scatter_direction)),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    fn scatter<R: Rng + ?Sized>(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut R) -> ScatterResult {
        let reflected = unit_vector(reflect(ray_in.direction(), rec.normal));
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Reflections pointing into the surface are absorbed
        let scattered = if reflected.dot(rec.normal) > 0.0 {
            Some(Ray::new(rec.p, direction))
        } else {
            None
        };

        ScatterResult {
            attenuation: self.albedo,
            scattered,
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    albedo: Color,
    /// Index of refraction
    ref_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `albedo`: tint applied on every pass, white for clear glass
    /// - `ref_index`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(albedo: Color, ref_index: f64) -> Self {
        Self { albedo, ref_index }
    }

    pub fn ref_index(&self) -> f64 {
        self.ref_index
    }

    /// Probability that a ray hitting at `rec` is reflected rather than
    /// refracted, together with the refracted direction when one exists.
    ///
    /// Total internal reflection yields probability 1.
    pub fn reflect_probability(&self, ray_in: &Ray, rec: &HitRecord) -> (f64, Option<Vec3>) {
        let direction = ray_in.direction();
        let unit_direction = unit_vector(direction);
        let d_dot_n = unit_direction.dot(rec.normal);

        let (outward_normal, ni, nt, cosine) = if d_dot_n > 0.0 {
            // Leaving the medium
            (-rec.normal, self.ref_index, 1.0, self.ref_index * d_dot_n)
        } else {
            (rec.normal, 1.0, self.ref_index, -d_dot_n)
        };

        match refract(direction, outward_normal, ni / nt) {
            Some(refracted) => (schlick(cosine.clamp(0.0, 1.0), ni, nt), Some(refracted)),
            None => (1.0, None),
        }
    }

    fn scatter<R: Rng + ?Sized>(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut R) -> ScatterResult {
        let (reflect_prob, refracted) = self.reflect_probability(ray_in, rec);

        let direction = match refracted {
            Some(refracted) if gen_f64(rng) >= reflect_prob => refracted,
            _ => reflect(ray_in.direction(), rec.normal),
        };

        ScatterResult {
            attenuation: self.albedo,
            scattered: Some(Ray::new(rec.p, direction)),
        }
    }
}

/// Pure emitter. Terminates every path that reaches it.
#[derive(Debug, Clone)]
pub struct Light {
    albedo: Color,
}

impl Light {
    /// Create a new light with the given emitted color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    fn scatter(&self) -> ScatterResult {
        ScatterResult {
            attenuation: self.albedo,
            scattered: None,
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

impl From<Light> for Material {
    fn from(m: Light) -> Self {
        Material::Light(m)
    }
}
