//! Applying masks to spectra and rendering inspection images.

#[cfg(test)]
mod tests;

mod drawing;

pub use drawing::draw_ring;

use glam::Vec2;

use crate::color::Color;
use crate::error::Result;
use crate::mask::Mask;
use crate::notch_set::NotchSet;
use crate::raster::Raster;

/// Ring band drawn around each notch, relative to its radius.
const NOTCH_RING_INNER: f32 = -1.0;
const NOTCH_RING_OUTER: f32 = 2.0;
/// Half-width of the ring marking the protected DC zone.
const DC_RING_HALF_WIDTH: f32 = 1.0;

/// Attenuates every channel by `1 - mask`. The spectrum's range is kept.
pub fn apply_mask(spectrum: &Raster, mask: &Mask) -> Result<Raster> {
    spectrum.desc().ensure_matches(mask.desc())?;

    let mut filtered = spectrum.clone();
    let channels = filtered.channels();
    for (px, &m) in filtered
        .pixels_mut()
        .chunks_exact_mut(channels)
        .zip(mask.iter())
    {
        let keep = 1.0 - m;
        px.iter_mut().for_each(|v| *v *= keep);
    }

    Ok(filtered)
}

/// Single-channel image of the mask; white marks removed frequencies.
pub fn mask_image(mask: &Mask) -> Raster {
    let mut plane = mask.clone();
    plane.pixels_mut().iter_mut().for_each(|v| *v = v.clamp(0.0, 1.0));
    Raster::from_plane(plane)
}

/// RGB preview: the spectrum with a ring per notch and one for the DC zone.
///
/// Purely illustrative; nothing downstream consumes it.
pub fn render_preview(spectrum: &Raster, notches: &NotchSet, protect_dc: f32) -> Raster {
    let mut preview = spectrum.to_display_rgb();

    if protect_dc > 0.0 {
        let (cx, cy) = spectrum.desc().dc_center();
        draw_ring(
            &mut preview,
            Vec2::new(cx as f32, cy as f32),
            protect_dc - DC_RING_HALF_WIDTH,
            protect_dc + DC_RING_HALF_WIDTH,
            Color::DC_RING,
        );
    }

    for circle in notches {
        draw_ring(
            &mut preview,
            Vec2::new(circle.x as f32, circle.y as f32),
            circle.r + NOTCH_RING_INNER,
            circle.r + NOTCH_RING_OUTER,
            Color::NOTCH_RING,
        );
    }

    preview
}
