//! Suppression mask synthesis.
//!
//! Every circle contributes a disk: hard-edged when `feather == 0`, otherwise
//! the edge profile of the disk blurred by a Gaussian of sigma `feather`,
//! i.e. `Φ((r - d) / feather)` with `d` the distance to the center. Values
//! fall to about zero `3 * feather` past the rim and are not evaluated beyond
//! `4 * feather`. Contributions are combined by maximum, so overlapping or
//! duplicated circles never exceed full suppression.


use rayon::prelude::*;

use crate::error::{NotchError, Result};
use crate::math::normal_cdf;
use crate::notch_set::NotchSet;
use crate::raster::{Plane, SpectrumDescriptor};

/// Per-pixel suppression strength in [0, 1]; 1 removes the pixel entirely.
pub type Mask = Plane<f32>;

/// Extent of the feathered tail, in sigmas.
const FEATHER_EXTENT_SIGMAS: f32 = 4.0;

/// Builds masks from notch sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskSynthesizer {
    feather: f32,
    extra_dc_radius: f32,
}

impl Default for MaskSynthesizer {
    fn default() -> Self {
        Self {
            feather: 0.0,
            extra_dc_radius: 0.0,
        }
    }
}

impl MaskSynthesizer {
    /// `extra_dc_radius > 0` adds a disk at the DC center to every mask.
    pub fn new(feather: f32, extra_dc_radius: f32) -> Result<Self> {
        if !(feather.is_finite() && feather >= 0.0) {
            return Err(NotchError::InvalidParameter {
                name: "feather",
                reason: format!("must be non-negative, got {}", feather),
            });
        }
        if !(extra_dc_radius.is_finite() && extra_dc_radius >= 0.0) {
            return Err(NotchError::InvalidParameter {
                name: "extra_dc_radius",
                reason: format!("must be non-negative, got {}", extra_dc_radius),
            });
        }
        Ok(Self {
            feather,
            extra_dc_radius,
        })
    }

    #[inline]
    pub fn feather(&self) -> f32 {
        self.feather
    }

    #[inline]
    pub fn extra_dc_radius(&self) -> f32 {
        self.extra_dc_radius
    }

    /// Synthesizes the mask for `notches` over a `desc`-sized spectrum.
    ///
    /// Circles partly or fully outside the spectrum are clipped.
    pub fn synthesize(&self, notches: &NotchSet, desc: SpectrumDescriptor) -> Mask {
        let width = desc.width;
        let mut mask = Plane::new_filled(width, desc.height, 0.0f32);
        if desc.is_empty() {
            return mask;
        }

        let mut disks: Vec<Disk> = notches
            .iter()
            .map(|c| Disk::new(c.x as f32, c.y as f32, c.r, self.feather))
            .collect();
        if self.extra_dc_radius > 0.0 {
            let (cx, cy) = desc.dc_center();
            disks.push(Disk::new(
                cx as f32,
                cy as f32,
                self.extra_dc_radius,
                self.feather,
            ));
        }
        disks.retain(|disk| disk.overlaps(desc));

        if disks.is_empty() {
            return mask;
        }

        mask.pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let py = y as f32;
                for disk in disks.iter().filter(|d| d.covers_row(py)) {
                    disk.rasterize_row(py, row);
                }
            });

        mask
    }
}

/// One circle with its feather, prepared for rasterization.
#[derive(Debug, Clone, Copy)]
struct Disk {
    cx: f32,
    cy: f32,
    radius: f32,
    feather: f32,
    /// Distance from the center past which the contribution is zero.
    extent: f32,
}

impl Disk {
    fn new(cx: f32, cy: f32, radius: f32, feather: f32) -> Self {
        let extent = if feather > 0.0 {
            radius + FEATHER_EXTENT_SIGMAS * feather
        } else {
            radius
        };
        Self {
            cx,
            cy,
            radius,
            feather,
            extent,
        }
    }

    fn overlaps(&self, desc: SpectrumDescriptor) -> bool {
        self.cx + self.extent >= 0.0
            && self.cy + self.extent >= 0.0
            && self.cx - self.extent <= (desc.width - 1) as f32
            && self.cy - self.extent <= (desc.height - 1) as f32
    }

    #[inline]
    fn covers_row(&self, y: f32) -> bool {
        (y - self.cy).abs() <= self.extent
    }

    #[inline]
    fn value_at(&self, dist_sq: f32) -> f32 {
        if self.feather > 0.0 {
            normal_cdf((self.radius - dist_sq.sqrt()) / self.feather)
        } else if dist_sq <= self.radius * self.radius {
            1.0
        } else {
            0.0
        }
    }

    /// Max-combines this disk into one mask row.
    fn rasterize_row(&self, y: f32, row: &mut [f32]) {
        let dy = y - self.cy;
        let extent_sq = self.extent * self.extent;
        let last = row.len() as i64 - 1;
        let x_min = ((self.cx - self.extent).floor() as i64).max(0);
        let x_max = ((self.cx + self.extent).ceil() as i64).min(last);

        for x in x_min..=x_max {
            let dx = x as f32 - self.cx;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > extent_sq {
                continue;
            }
            let value = self.value_at(dist_sq).clamp(0.0, 1.0);
            let slot = &mut row[x as usize];
            if value > *slot {
                *slot = value;
            }
        }
    }
}
