//! Pixel containers for spectra, masks and previews.
//!
//! [`Plane`] is a single-channel row-major grid; [`Raster`] holds interleaved
//! multi-channel `f32` pixels as produced by the upstream transform.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{NotchError, Result};

/// Luma weights applied when reducing RGB(A) spectra to intensity.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Native pixel dimensions of a spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpectrumDescriptor {
    pub width: usize,
    pub height: usize,
}

impl SpectrumDescriptor {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Zero-area spectra are degenerate: detection and masking yield empty results.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Zero-frequency position of a centered spectrum.
    #[inline]
    pub fn dc_center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Point-mirror of `(x, y)` about the spectrum center, saturating at the
    /// `i32` range for far off-surface points.
    #[inline]
    pub fn conjugate(&self, x: i32, y: i32) -> (i32, i32) {
        let mirror = |extent: usize, v: i32| {
            (extent as i64 - 1 - v as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        (mirror(self.width, x), mirror(self.height, y))
    }

    pub(crate) fn ensure_matches(&self, other: SpectrumDescriptor) -> Result<()> {
        if *self == other {
            return Ok(());
        }
        Err(NotchError::DimensionMismatch {
            expected_width: self.width,
            expected_height: self.height,
            actual_width: other.width,
            actual_height: other.height,
        })
    }
}

/// Single-channel row-major grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Plane<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn desc(&self) -> SpectrumDescriptor {
        SpectrumDescriptor::new(self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.pixels.iter()
    }
}

impl<T: Clone> Plane<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }
}

impl<T> Index<(usize, usize)> for Plane<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        debug_assert!(x < self.width && y < self.height);
        &self.pixels[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Plane<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        debug_assert!(x < self.width && y < self.height);
        &mut self.pixels[y * self.width + x]
    }
}

/// Interleaved `f32` image with 1 to 4 channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    pixels: Vec<f32>,
}

impl Raster {
    pub fn new(width: usize, height: usize, channels: usize, pixels: Vec<f32>) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(NotchError::InvalidParameter {
                name: "channels",
                reason: format!("expected 1..=4 channels, got {}", channels),
            });
        }
        if pixels.len() != width * height * channels {
            return Err(NotchError::InvalidParameter {
                name: "pixels",
                reason: format!(
                    "expected {} samples for {}x{}x{}, got {}",
                    width * height * channels,
                    width,
                    height,
                    channels,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    pub fn new_black(width: usize, height: usize, channels: usize) -> Result<Self> {
        Self::new(width, height, channels, vec![0.0; width * height * channels])
    }

    /// Wraps a single-channel plane without copying.
    pub fn from_plane(plane: Plane<f32>) -> Self {
        let (width, height) = (plane.width(), plane.height());
        Self {
            width,
            height,
            channels: 1,
            pixels: plane.into_vec(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn desc(&self) -> SpectrumDescriptor {
        SpectrumDescriptor::new(self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.pixels
    }

    /// Samples of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let start = (y * self.width + x) * self.channels;
        &self.pixels[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [f32] {
        let start = (y * self.width + x) * self.channels;
        &mut self.pixels[start..start + self.channels]
    }

    /// Reduces the raster to a single intensity channel.
    ///
    /// Three or more channels use Rec. 601 luma weights (alpha ignored);
    /// one- and two-channel rasters take their first channel.
    pub fn intensity(&self) -> Plane<f32> {
        let channels = self.channels;
        let values = self
            .pixels
            .chunks_exact(channels)
            .map(|px| {
                if channels >= 3 {
                    LUMA_WEIGHTS[0] * px[0] + LUMA_WEIGHTS[1] * px[1] + LUMA_WEIGHTS[2] * px[2]
                } else {
                    px[0]
                }
            })
            .collect();

        Plane::new(self.width, self.height, values)
    }

    /// Copies the raster into an RGB raster clamped to `[0, 1]`.
    ///
    /// Grey channels are replicated; alpha is dropped.
    pub fn to_display_rgb(&self) -> Raster {
        let channels = self.channels;
        let mut pixels = Vec::with_capacity(self.width * self.height * 3);
        for px in self.pixels.chunks_exact(channels) {
            let rgb = if channels >= 3 {
                [px[0], px[1], px[2]]
            } else {
                [px[0]; 3]
            };
            pixels.extend(rgb.iter().map(|v| v.clamp(0.0, 1.0)));
        }

        Raster {
            width: self.width,
            height: self.height,
            channels: 3,
            pixels,
        }
    }
}
