use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use notch::Raster;

/// Decodes an image into a float raster in [0, 1].
///
/// Color images become 3-channel RGB, everything else single-channel.
pub fn load_raster(path: &Path) -> anyhow::Result<Raster> {
    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let raster = if img.color().has_color() {
        Raster::new(width, height, 3, img.to_rgb32f().into_raw())?
    } else {
        Raster::new(width, height, 1, img.to_luma32f().into_raw())?
    };

    tracing::debug!(
        "Loaded {} ({}x{}, {} channel(s))",
        path.display(),
        width,
        height,
        raster.channels()
    );

    Ok(raster)
}

/// Encodes a raster as 8-bit, clamping samples to [0, 1].
pub fn save_raster(raster: &Raster, path: &Path) -> anyhow::Result<()> {
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    let channels = raster.channels();
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;

    let image = match channels {
        1 | 2 => {
            let bytes = raster
                .pixels()
                .chunks_exact(channels)
                .map(|px| to_u8(px[0]))
                .collect();
            GrayImage::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8)
        }
        3 => {
            let bytes = raster.pixels().iter().map(|&v| to_u8(v)).collect();
            RgbImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8)
        }
        _ => {
            let bytes = raster.pixels().iter().map(|&v| to_u8(v)).collect();
            RgbaImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8)
        }
    }
    .context("Raster size does not match its pixel buffer")?;

    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
