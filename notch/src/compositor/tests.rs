//! Tests for mask application and preview rendering.

use super::*;
use crate::error::NotchError;
use crate::mask::MaskSynthesizer;
use crate::notch_set::Circle;
use crate::raster::{Plane, SpectrumDescriptor};

fn gradient(width: usize, height: usize, channels: usize) -> Raster {
    let pixels = (0..width * height * channels)
        .map(|i| 0.25 + (i % 7) as f32 * 0.1)
        .collect();
    Raster::new(width, height, channels, pixels).unwrap()
}

#[test]
fn test_apply_mask_scales_every_channel() {
    let spectrum = gradient(4, 3, 3);
    let mut mask = Plane::new_filled(4, 3, 0.0f32);
    mask[(1, 1)] = 1.0;
    mask[(2, 1)] = 0.25;

    let filtered = apply_mask(&spectrum, &mask).unwrap();

    assert_eq!(filtered.channels(), 3);
    assert_eq!(filtered.pixel(0, 0), spectrum.pixel(0, 0));
    assert!(filtered.pixel(1, 1).iter().all(|&v| v == 0.0));
    for (f, s) in filtered.pixel(2, 1).iter().zip(spectrum.pixel(2, 1)) {
        assert!((f - s * 0.75).abs() < 1e-6);
    }
}

#[test]
fn test_apply_mask_keeps_values_outside_unit_range() {
    let spectrum = Raster::new(2, 1, 1, vec![250.0, -3.0]).unwrap();
    let mask = Plane::new(2, 1, vec![0.5, 0.0]);

    let filtered = apply_mask(&spectrum, &mask).unwrap();

    assert_eq!(filtered.pixels(), &[125.0, -3.0]);
}

#[test]
fn test_apply_mask_rejects_mismatched_sizes() {
    let spectrum = gradient(4, 4, 1);
    let mask = Plane::new_filled(4, 5, 0.0f32);
    assert!(matches!(
        apply_mask(&spectrum, &mask),
        Err(NotchError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_zero_mask_is_identity() {
    let spectrum = gradient(8, 8, 4);
    let mask = MaskSynthesizer::default().synthesize(&NotchSet::new(), spectrum.desc());
    assert_eq!(apply_mask(&spectrum, &mask).unwrap(), spectrum);
}

#[test]
fn test_mask_image_is_single_channel_white_for_removed() {
    let mask = Plane::new(3, 1, vec![0.0, 0.5, 1.0]);
    let image = mask_image(&mask);
    assert_eq!(image.channels(), 1);
    assert_eq!(image.pixels(), &[0.0, 0.5, 1.0]);
}

#[test]
fn test_preview_draws_notch_and_dc_rings_in_distinct_colors() {
    let spectrum = Raster::new_black(64, 64, 1).unwrap();
    let notches = NotchSet::from(vec![Circle::new(10, 10, 4.0)]);

    let preview = render_preview(&spectrum, &notches, 8.0);

    assert_eq!(preview.channels(), 3);
    assert_eq!(preview.desc(), SpectrumDescriptor::new(64, 64));
    // Notch ring band is (r - 1, r + 2].
    assert_eq!(preview.pixel(15, 10), &Color::NOTCH_RING.to_rgb());
    assert_eq!(preview.pixel(10, 10), &[0.0, 0.0, 0.0]);
    // DC ring band is (protect_dc - 1, protect_dc + 1] around (32, 32).
    assert_eq!(preview.pixel(40, 32), &Color::DC_RING.to_rgb());
    assert_eq!(preview.pixel(32, 32), &[0.0, 0.0, 0.0]);
}

#[test]
fn test_preview_without_dc_protection_has_only_notch_rings() {
    let spectrum = gradient(32, 32, 3);
    let preview = render_preview(&spectrum, &NotchSet::new(), 0.0);
    assert_eq!(preview, spectrum.to_display_rgb());
}
