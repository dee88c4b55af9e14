//! Ring outlines on rasters.

use glam::Vec2;

use crate::color::Color;
use crate::raster::Raster;

/// Draws the ring `inner < distance <= outer` around `center`.
///
/// Pixels outside the raster are skipped. Single-channel rasters receive the
/// color's luminance.
pub fn draw_ring(image: &mut Raster, center: Vec2, inner: f32, outer: f32, color: Color) {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 || outer <= 0.0 {
        return;
    }

    let inner = inner.max(0.0);
    let inner_sq = inner * inner;
    let outer_sq = outer * outer;

    let x_min = ((center.x - outer).floor() as i64).max(0);
    let x_max = ((center.x + outer).ceil() as i64).min(width as i64 - 1);
    let y_min = ((center.y - outer).floor() as i64).max(0);
    let y_max = ((center.y + outer).ceil() as i64).min(height as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = x as f32 - center.x;
            let dy = y as f32 - center.y;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq > inner_sq && dist_sq <= outer_sq {
                draw_pixel(image.pixel_mut(x as usize, y as usize), color);
            }
        }
    }
}

#[inline]
fn draw_pixel(pixel: &mut [f32], color: Color) {
    match pixel.len() {
        1 | 2 => pixel[0] = color.luminance(),
        _ => pixel[..3].copy_from_slice(&color.to_rgb()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_leaves_inside_and_outside_untouched() {
        let mut img = Raster::new_black(40, 40, 3).unwrap();
        draw_ring(&mut img, Vec2::new(20.0, 20.0), 5.0, 8.0, Color::NOTCH_RING);

        assert_eq!(img.pixel(20, 20), &[0.0, 0.0, 0.0]);
        assert_eq!(img.pixel(25, 20), &[0.0, 0.0, 0.0]);
        assert_eq!(img.pixel(26, 20), &[1.0, 0.9, 0.0]);
        assert_eq!(img.pixel(28, 20), &[1.0, 0.9, 0.0]);
        assert_eq!(img.pixel(29, 20), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_ring_is_clipped_at_borders() {
        let mut img = Raster::new_black(10, 10, 1).unwrap();
        draw_ring(&mut img, Vec2::new(-2.0, 0.0), 2.0, 4.0, Color::WHITE);

        assert!((img.pixel(1, 0)[0] - 1.0).abs() < 1e-6);
        assert_eq!(img.pixel(5, 5)[0], 0.0);
    }
}
