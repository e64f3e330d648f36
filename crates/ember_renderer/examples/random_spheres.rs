//! Random spheres example.
//!
//! Builds the classic ground, three large spheres and a grid of small random
//! spheres, then renders it to PPM. Pass `--json` to print the scene file
//! instead of rendering.

use ember_core::{
    CameraSpec, ImageSpec, ObjectsSpec, RenderSpec, SceneSpec, Settings, SphereSpec, SurfaceSpec,
};
use ember_renderer::{render_to_buffer, ImageBuffer, RenderConfig, Scene};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let spec = build_spec(&mut StdRng::seed_from_u64(2017));
    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }

    println!("Ember Path Tracer - Random Spheres");
    println!("==================================");
    println!("Created {} spheres", spec.scene.objects.spheres.len());

    let scene = Scene::from_spec(&spec.scene)?;
    let config = RenderConfig::new(spec.image.width, spec.image.height)
        .with_quality(spec.image.samples, spec.render_depth());

    let start = std::time::Instant::now();
    let image = render_to_buffer(&scene, &config)?;
    println!("Rendered in {:?}", start.elapsed());

    save_ppm(&image, &spec.image.output_file)?;
    println!("Saved to {}", spec.image.output_file);
    Ok(())
}

fn surface(kind: &str, albedo: [f64; 3]) -> SurfaceSpec {
    SurfaceSpec {
        surface_type: kind.to_string(),
        albedo,
        fuzz: 0.0,
        ref_index: 0.0,
    }
}

fn build_spec(rng: &mut StdRng) -> RenderSpec {
    let mut spheres = vec![SphereSpec {
        center: [0.0, -1000.0, 0.0],
        radius: 1000.0,
        surface: surface("Lambertian", [0.5, 0.5, 0.5]),
    }];

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = [
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            ];
            let offset = [center[0] - 4.0, 0.0, center[2]];
            if offset.iter().map(|c| c * c).sum::<f64>().sqrt() <= 0.9 {
                continue;
            }

            let surface = if choose_mat < 0.5 {
                // Diffuse
                let mut albedo = || rng.gen::<f64>() * rng.gen::<f64>();
                surface("Lambertian", [albedo(), albedo(), albedo()])
            } else if choose_mat < 0.9 {
                // Metal
                let mut albedo = || 0.5 * (1.0 + rng.gen::<f64>());
                let albedo = [albedo(), albedo(), albedo()];
                SurfaceSpec {
                    fuzz: 0.5 * rng.gen::<f64>(),
                    ..surface("Metal", albedo)
                }
            } else {
                // Glass
                SurfaceSpec {
                    ref_index: 1.5 + 0.5 * rng.gen::<f64>(),
                    ..surface("Dielectric", [1.0, 1.0, 1.0])
                }
            };
            spheres.push(SphereSpec {
                center,
                radius: 0.2,
                surface,
            });
        }
    }

    spheres.push(SphereSpec {
        center: [0.0, 1.0, 0.0],
        radius: 1.0,
        surface: SurfaceSpec {
            ref_index: 1.5,
            ..surface("Dielectric", [1.0, 1.0, 1.0])
        },
    });
    spheres.push(SphereSpec {
        center: [-4.0, 1.0, 0.0],
        radius: 1.0,
        surface: surface("Lambertian", [0.4, 0.2, 0.1]),
    });
    spheres.push(SphereSpec {
        center: [4.0, 1.0, 0.0],
        radius: 1.0,
        surface: surface("Metal", [0.7, 0.6, 0.5]),
    });

    RenderSpec {
        settings: Settings::default(),
        image: ImageSpec {
            output_file: "random_spheres.ppm".to_string(),
            width: 600,
            height: 300,
            samples: 50,
            patch: None,
        },
        scene: SceneSpec {
            camera: CameraSpec {
                look_from: [13.0, 2.0, 3.0],
                look_at: [0.0, 0.0, 0.0],
                up_vector: [0.0, 1.0, 0.0],
                field_of_view: 20.0,
                aspect_ratio: 2.0,
                aperture: 0.1,
                focus: 10.0,
            },
            objects: ObjectsSpec { spheres },
            ambient_light: None,
        },
    }
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(filename)?);
    image.write_ppm(&mut writer)?;
    writer.flush()
}
