//! Image file output.
//!
//! `.ppm` files are written as plain-text P3; every other extension goes
//! through the `image` crate, which picks the encoder from the extension.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ember_renderer::ImageBuffer;
use log::info;

/// Save a rendered image, creating parent directories as needed.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        image.write_ppm(&mut writer)?;
        writer.flush()?;
    } else {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb_bytes())
            .context("Pixel buffer does not match image size")?;
        rgb.save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    info!("Image saved as {}", path.display());
    Ok(())
}
