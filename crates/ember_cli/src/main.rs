use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::sync_channel;

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{load_spec, RenderSpec};
use ember_renderer::{render_streaming, ImageBuffer, PixelRegion, RenderConfig, RenderReport, Scene};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};

mod cli;
mod output;

use cli::Args;
use output::save_image;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Render settings for a loaded spec.
fn render_config(spec: &RenderSpec, seed: Option<u64>) -> Result<RenderConfig> {
    let image = &spec.image;
    let region = PixelRegion::from_patch(image.width, image.height, image.patch())?;

    let mut config = RenderConfig::new(image.width, image.height)
        .with_region(region)
        .with_quality(image.samples, spec.render_depth());
    if spec.settings.render_routines > 0 {
        config = config.with_workers(spec.settings.render_routines);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Render with pixels streamed into an image buffer as they finish.
fn render(
    scene: &Scene,
    config: &RenderConfig,
    show_progress: bool,
) -> Result<(ImageBuffer, RenderReport)> {
    let (sender, receiver) = sync_channel(config.channel_capacity);
    let cancel = AtomicBool::new(false);

    let progress = if show_progress {
        let pb = ProgressBar::new(config.region.pixel_count() as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}")?);
        pb
    } else {
        ProgressBar::hidden()
    };

    std::thread::scope(|s| -> Result<(ImageBuffer, RenderReport)> {
        let compositor = s.spawn(|| {
            let mut image = ImageBuffer::new(config.region.width(), config.region.height());
            for pixel in receiver {
                image.set(pixel);
                progress.inc(1);
            }
            progress.finish();
            image
        });

        let report = render_streaming(scene, config, sender, &cancel);
        let image = compositor
            .join()
            .map_err(|_| anyhow::anyhow!("Image compositor panicked"))?;
        Ok((image, report?))
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut spec = load_spec(&args.spec)
        .with_context(|| format!("Failed to load render spec {}", args.spec.display()))?;
    args.apply(&mut spec);
    spec.validate().context("Invalid render spec")?;

    let scene = Scene::from_spec(&spec.scene).context("Failed to build scene")?;
    let config = render_config(&spec, args.seed)?;

    let (image, report) = render(&scene, &config, spec.settings.show_progress)?;
    info!(
        "Rendered {} pixels in {:.2?}",
        report.pixels_rendered, report.elapsed
    );

    let output = if spec.image.output_file.is_empty() {
        PathBuf::from("output.png")
    } else {
        PathBuf::from(&spec.image.output_file)
    };
    save_image(&image, &output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::load_spec_from_str;

    const SMALL_SPEC: &str = r#"{
        "Settings": { "RenderRoutines": 2, "RenderDepth": 0 },
        "Image": { "OutputFile": "small.png", "Width": 16, "Height": 8, "Samples": 2,
                   "Patch": [2, 6, 0, 16] },
        "Scene": {
            "Camera": { "LookFrom": [0, 0, 0], "LookAt": [0, 0, -1], "FieldOfView": 90, "AspectRatio": 2 },
            "Objects": { "Spheres": [
                { "Center": [0, 0, -1], "Radius": 0.5,
                  "Surface": { "Type": "Lambertian", "Albedo": [0.5, 0.5, 0.5] } }
            ] }
        }
    }"#;

    #[test]
    fn test_render_config_from_spec() {
        let spec = load_spec_from_str(SMALL_SPEC).unwrap();
        let config = render_config(&spec, Some(5)).unwrap();

        assert_eq!(config.region.pixel_count(), 4 * 16);
        assert_eq!(config.samples_per_pixel, 2);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_render_patch() {
        let spec = load_spec_from_str(SMALL_SPEC).unwrap();
        let scene = Scene::from_spec(&spec.scene).unwrap();
        let config = render_config(&spec, Some(5)).unwrap();

        let (image, report) = render(&scene, &config, false).unwrap();
        assert_eq!(report.pixels_rendered, 64);
        assert!(!report.cancelled);
        // Outside the patch stays black, inside sees the sky or the sphere
        assert_eq!(image.get(0, 0), [0, 0, 0]);
        assert_ne!(image.get(2, 0), [0, 0, 0]);
    }
}
