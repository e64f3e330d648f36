//! Renderable scene: camera, objects and background.

use crate::{Background, Camera, HittableList, Material, Sphere, Surface};
use ember_core::{SceneResult, SceneSpec};
use ember_math::{Color, Vec3};

/// Everything a worker needs to trace rays.
///
/// Read-only once built; shared by reference across all workers.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    world: HittableList,
    background: Background,
}

impl Scene {
    pub fn new(camera: Camera, world: HittableList, background: Background) -> Self {
        Self {
            camera,
            world,
            background,
        }
    }

    /// Build from a scene-file section.
    ///
    /// Validates first, so an unknown surface type or a bad sphere fails here
    /// rather than mid-render.
    pub fn from_spec(spec: &SceneSpec) -> SceneResult<Self> {
        spec.validate()?;

        let camera = Camera::from_spec(&spec.camera);
        let world = spec
            .objects
            .spheres
            .iter()
            .map(|sphere| {
                let material = Material::from_spec(&sphere.surface)?;
                Ok(Surface::from(Sphere::new(
                    Vec3::from(sphere.center),
                    sphere.radius,
                    material,
                )))
            })
            .collect::<SceneResult<HittableList>>()?;
        let background = match spec.ambient_light {
            Some(ambient) => Background::Ambient(Color::from(ambient)),
            None => Background::Gradient,
        };

        log::debug!(
            "Built scene: {} spheres, background {:?}",
            world.len(),
            background
        );

        Ok(Self::new(camera, world, background))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &HittableList {
        &self.world
    }

    pub fn background(&self) -> Background {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Interval, Ray};
    use ember_core::{load_spec_from_str, SceneError};

    const TWO_SPHERES: &str = r#"{
        "Image": { "Width": 20, "Height": 10, "Samples": 1 },
        "Scene": {
            "Camera": { "LookFrom": [0, 0, 0], "LookAt": [0, 0, -1], "FieldOfView": 90, "AspectRatio": 2 },
            "Objects": { "Spheres": [
                { "Center": [0, 0, -1], "Radius": 0.5,
                  "Surface": { "Type": "Metal", "Albedo": [0.8, 0.6, 0.2], "Fuzz": 0.3 } },
                { "Center": [0, -100.5, -1], "Radius": 100,
                  "Surface": { "Type": "Lambertian", "Albedo": [0.8, 0.8, 0.0] } }
            ] }
        }
    }"#;

    #[test]
    fn test_from_spec() {
        let spec = load_spec_from_str(TWO_SPHERES).unwrap();
        let scene = Scene::from_spec(&spec.scene).unwrap();

        assert_eq!(scene.world().len(), 2);
        assert_eq!(scene.background(), Background::Gradient);

        let hit = scene
            .world()
            .hit(
                &Ray::new(Vec3::ZERO, Vec3::NEG_Z),
                Interval::new(1e-4, f64::INFINITY),
            )
            .unwrap();
        match hit.material {
            Material::Metal(metal) => assert_eq!(metal.fuzz(), 0.3),
            other => panic!("expected metal, got {:?}", other),
        }
    }

    #[test]
    fn test_ambient_light_background() {
        let mut spec = load_spec_from_str(TWO_SPHERES).unwrap();
        spec.scene.ambient_light = Some([0.2, 0.2, 0.3]);

        let scene = Scene::from_spec(&spec.scene).unwrap();
        assert_eq!(
            scene.background(),
            Background::Ambient(Color::new(0.2, 0.2, 0.3))
        );
    }

    #[test]
    fn test_unknown_surface_is_fatal() {
        let mut spec = load_spec_from_str(TWO_SPHERES).unwrap();
        spec.scene.objects.spheres[1].surface.surface_type = "Kaboom".to_string();

        match Scene::from_spec(&spec.scene) {
            Err(SceneError::UnknownSurfaceType(name)) => assert_eq!(name, "Kaboom"),
            other => panic!("expected unknown surface error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_scene() {
        let mut spec = load_spec_from_str(TWO_SPHERES).unwrap();
        spec.scene.objects.spheres.clear();

        let scene = Scene::from_spec(&spec.scene).unwrap();
        assert!(scene.world().is_empty());
    }
}
