//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth cap
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use crate::partition::PixelRegion;
use crate::sampling::gen_f64;
use crate::{Hittable, Scene};
use ember_math::{unit_vector, Color, Interval, Ray};
use rand::Rng;
use std::io::{self, Write};

/// Default maximum bounce depth.
pub const MAX_RENDER_DEPTH: u32 = 10;

/// Smallest accepted hit distance; keeps bounced rays off their own surface.
pub const T_MIN: f64 = 1e-4;

/// Radiance for rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Vertical blend from white (down) to sky blue (up)
    Gradient,
    /// Constant ambient light
    Ambient(Color),
}

impl Default for Background {
    fn default() -> Self {
        Background::Gradient
    }
}

impl Background {
    /// Color seen along a ray that hits nothing.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Gradient => {
                let unit_direction = unit_vector(ray.direction());
                let t = 0.5 * (unit_direction.y + 1.0);
                let white = Color::new(1.0, 1.0, 1.0);
                let blue = Color::new(0.5, 0.7, 1.0);
                white * (1.0 - t) + blue * t
            }
            Background::Ambient(color) => *color,
        }
    }
}

/// Sampling parameters for one render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Pixels to render, and the image they belong to
    pub region: PixelRegion,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker count; `None` picks one from the available cores
    pub workers: Option<usize>,
    /// Base seed for the per-worker generators; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Bound of the streaming result channel
    pub channel_capacity: usize,
}

impl RenderConfig {
    /// Full-image render with default quality.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            region: PixelRegion::full(width, height),
            samples_per_pixel: 100,
            max_depth: MAX_RENDER_DEPTH,
            workers: None,
            seed: None,
            channel_capacity: 1000,
        }
    }

    /// Restrict the render to part of the image.
    pub fn with_region(mut self, region: PixelRegion) -> Self {
        self.region = region;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces so far. Lights end the path with their emission;
/// any other surface contributes nothing once `max_depth` is reached.
pub fn ray_color<R: Rng + ?Sized>(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    max_depth: u32,
    rng: &mut R,
) -> Color {
    let Some(rec) = scene.world().hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return scene.background().color(ray);
    };

    let result = rec.material.scatter(ray, &rec, rng);
    if rec.material.is_light() {
        return result.attenuation;
    }

    match result.scattered {
        Some(scattered) if depth < max_depth => {
            result.attenuation * ray_color(&scattered, scene, depth + 1, max_depth, rng)
        }
        _ => Color::ZERO,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB, gamma corrected and clamped.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 255.0);
    let channel = |c: f64| intensity.clamp(linear_to_gamma(c) * 255.99) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `row` 0 is the top of the image.
pub fn render_pixel<R: Rng + ?Sized>(
    scene: &Scene,
    row: u32,
    col: u32,
    config: &RenderConfig,
    rng: &mut R,
) -> Pixel {
    let width = config.region.width() as f64;
    let height = config.region.height() as f64;
    // Camera coordinates grow upwards
    let y = (config.region.height() - 1 - row) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (col as f64 + gen_f64(rng)) / width;
        let v = (y + gen_f64(rng)) / height;
        let ray = scene.camera().ray_at(u, v, rng);
        pixel_color += ray_color(&ray, scene, 0, config.max_depth, rng);
    }

    Pixel {
        row,
        col,
        rgb: color_to_rgb(pixel_color / config.samples_per_pixel as f64),
    }
}

/// One finished output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub row: u32,
    pub col: u32,
    pub rgb: [u8; 3],
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: u32, col: u32) -> [u8; 3] {
        self.pixels[self.index(row, col)]
    }

    /// Store a rendered pixel at its coordinate.
    pub fn set(&mut self, pixel: Pixel) {
        let index = self.index(pixel.row, pixel.col);
        self.pixels[index] = pixel.rgb;
    }

    /// Row-major RGB bytes, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Write as plain-text P3 PPM, one image row per line.
    pub fn write_ppm<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for row in 0..self.height {
            for col in 0..self.width {
                let [r, g, b] = self.get(row, col);
                write!(writer, "{} {} {} ", r, g, b)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, HittableList, Lambertian, Light, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 1.0, 0.0, 1.0)
    }

    fn single_sphere_scene() -> Scene {
        let mut world = HittableList::new();
        world.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Lambertian::new(Color::new(0.5, 0.5, 0.5)).into(),
        ));
        Scene::new(camera(), world, Background::Gradient)
    }

    #[test]
    fn test_sky_gradient() {
        let up = Background::Gradient.color(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = Background::Gradient.color(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        let level = Background::Gradient.color(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));

        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_ambient_background() {
        let ambient = Background::Ambient(Color::new(0.1, 0.2, 0.3));
        assert_eq!(
            ambient.color(&Ray::new(Vec3::ZERO, Vec3::Y)),
            Color::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(1.0), 1.0);
        assert_eq!(linear_to_gamma(0.25), 0.5);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
    }

    #[test]
    fn test_color_to_rgb_clamps() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(1.5, 4.0, 1e9)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(-1.0, f64::NAN, 0.25)), [0, 0, 127]);
    }

    #[test]
    fn test_empty_scene_is_background() {
        let scene = Scene::new(camera(), HittableList::new(), Background::Gradient);
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..100 {
            let ray = scene
                .camera()
                .ray_at(gen_f64(&mut rng), gen_f64(&mut rng), &mut rng);
            let color = ray_color(&ray, &scene, 0, MAX_RENDER_DEPTH, &mut rng);
            assert_eq!(color, Background::Gradient.color(&ray));
        }
    }

    #[test]
    fn test_empty_scene_pixels_match_gradient() {
        let scene = Scene::new(camera(), HittableList::new(), Background::Gradient);
        let config = RenderConfig::new(8, 6).with_quality(1, MAX_RENDER_DEPTH);

        for row in 0..6 {
            for col in 0..8 {
                let mut rng = StdRng::seed_from_u64((row * 8 + col) as u64);
                let mut replay = rng.clone();
                let pixel = render_pixel(&scene, row, col, &config, &mut rng);

                let u = (col as f64 + gen_f64(&mut replay)) / 8.0;
                let v = ((5 - row) as f64 + gen_f64(&mut replay)) / 6.0;
                let ray = scene.camera().ray_at(u, v, &mut replay);
                assert_eq!(pixel.rgb, color_to_rgb(Background::Gradient.color(&ray)));
                assert_eq!((pixel.row, pixel.col), (row, col));
            }
        }
    }

    #[test]
    fn test_diffuse_sphere_darker_than_background() {
        let scene = single_sphere_scene();
        let center_ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let background = Background::Gradient.color(&center_ray);
        let mut rng = StdRng::seed_from_u64(42);

        // Depth cap reached on the first hit
        let capped = ray_color(&center_ray, &scene, 0, 0, &mut rng);
        assert_eq!(capped, Color::ZERO);

        for _ in 0..50 {
            let color = ray_color(&center_ray, &scene, 0, MAX_RENDER_DEPTH, &mut rng);
            assert!(color.x < background.x);
            assert!(color.y < background.y);
            assert!(color.z < background.z);
        }
    }

    #[test]
    fn test_center_pixel_darker_than_background() {
        let scene = single_sphere_scene();
        let config = RenderConfig::new(11, 11).with_quality(1, 0);
        let mut rng = StdRng::seed_from_u64(42);

        let pixel = render_pixel(&scene, 5, 5, &config, &mut rng);
        let background = color_to_rgb(Background::Gradient.color(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)));
        for channel in 0..3 {
            assert!(pixel.rgb[channel] < background[channel]);
        }
    }

    #[test]
    fn test_light_returns_emission_at_any_depth() {
        let mut world = HittableList::new();
        world.add(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Light::new(Color::new(4.0, 2.0, 1.0)).into(),
        ));
        let scene = Scene::new(camera(), world, Background::Ambient(Color::ZERO));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(ray_color(&ray, &scene, 0, 10, &mut rng), Color::new(4.0, 2.0, 1.0));
        assert_eq!(ray_color(&ray, &scene, 10, 10, &mut rng), Color::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(Pixel {
            row: 1,
            col: 2,
            rgb: [1, 2, 3],
        });
        assert_eq!(image.get(1, 2), [1, 2, 3]);
        assert_eq!(image.get(0, 0), [0, 0, 0]);

        let bytes = image.to_rgb_bytes();
        assert_eq!(bytes.len(), 18);
        assert_eq!(&bytes[15..18], &[1, 2, 3]);
    }

    #[test]
    fn test_image_buffer_index_past_u32() {
        // 70000 * 70000 does not fit in a u32; indexing must still land on
        // the right slot without allocating the full image.
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(69_999, 69_999), 70_000 * 70_000 - 1);
        assert_eq!(image.index(61_356, 20_000), 61_356 * 70_000 + 20_000);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(Pixel {
            row: 0,
            col: 0,
            rgb: [255, 0, 10],
        });
        image.set(Pixel {
            row: 0,
            col: 1,
            rgb: [1, 2, 3],
        });

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n255 0 10 1 2 3 \n"
        );
    }
}
