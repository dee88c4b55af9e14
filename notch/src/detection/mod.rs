//! Automatic notch detection by local-maxima analysis.
//!
//! Periodic interference shows up as isolated bright peaks in the amplitude
//! spectrum. Detection works on the intensity image:
//! 1. Find the maximum `M` outside the protected DC zone
//! 2. Run a square maximum filter of size `2 * min_distance + 1`
//! 3. Keep pixels equal to their filtered value and at least
//!    `threshold_rel * M`, outside the DC zone
//!
//! Pixels on an exactly flat plateau all equal the filtered value, so a
//! plateau yields several adjacent detections. This is inherent to
//! max-filter peak picking and is kept as is.


mod max_filter;

pub use max_filter::maximum_filter;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{NotchError, Result};
use crate::notch_set::{Circle, NotchSet, MIN_RADIUS};
use crate::raster::{Plane, Raster, SpectrumDescriptor};

/// Smallest filter half-width; the window is never below 3x3.
const MIN_FILTER_RADIUS: usize = 1;

/// Parameters for [`PeakDetector`] and the automatic pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParameters {
    /// Peak threshold as a fraction of the maximum outside the DC zone, in (0, 1].
    pub threshold_rel: f32,
    /// Half-width of the maximum filter window in pixels.
    pub min_distance: usize,
    /// Radius assigned to each detected notch.
    pub notch_radius: f32,
    /// Radius around the DC center excluded from detection. 0 disables it.
    pub protect_dc: f32,
    /// Gaussian sigma of the mask edge. 0 gives hard edges.
    pub feather: f32,
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            threshold_rel: 0.5,
            min_distance: 10,
            notch_radius: 8.0,
            protect_dc: 20.0,
            feather: 2.0,
        }
    }
}

impl DetectionParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold_rel > 0.0 && self.threshold_rel <= 1.0) {
            return Err(invalid(
                "threshold_rel",
                format!("must be in (0, 1], got {}", self.threshold_rel),
            ));
        }
        if self.min_distance < 1 {
            return Err(invalid("min_distance", "must be at least 1".to_string()));
        }
        if !(self.notch_radius.is_finite() && self.notch_radius > 0.0) {
            return Err(invalid(
                "notch_radius",
                format!("must be positive, got {}", self.notch_radius),
            ));
        }
        if !(self.protect_dc.is_finite() && self.protect_dc >= 0.0) {
            return Err(invalid(
                "protect_dc",
                format!("must be non-negative, got {}", self.protect_dc),
            ));
        }
        if !(self.feather.is_finite() && self.feather >= 0.0) {
            return Err(invalid(
                "feather",
                format!("must be non-negative, got {}", self.feather),
            ));
        }
        Ok(())
    }

    /// Half-width of the maximum filter window.
    #[inline]
    pub fn filter_radius(&self) -> usize {
        self.min_distance.max(MIN_FILTER_RADIUS)
    }
}

fn invalid(name: &'static str, reason: String) -> NotchError {
    NotchError::InvalidParameter { name, reason }
}

/// Disk around the DC center that is never treated as noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcZone {
    center: (i32, i32),
    radius_sq: Option<f32>,
}

impl DcZone {
    /// Pixels within `radius` of the DC center, inclusive.
    ///
    /// A zero radius disables the zone entirely, so the center pixel itself
    /// stays eligible as a peak and counts toward the global maximum.
    pub fn new(desc: SpectrumDescriptor, radius: f32) -> Self {
        Self {
            center: desc.dc_center(),
            radius_sq: (radius > 0.0).then_some(radius * radius),
        }
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        match self.radius_sq {
            Some(radius_sq) => {
                let dx = x as f32 - self.center.0 as f32;
                let dy = y as f32 - self.center.1 as f32;
                dx * dx + dy * dy <= radius_sq
            }
            None => false,
        }
    }
}

/// Stateless peak detector configured with [`DetectionParameters`].
#[derive(Debug, Clone)]
pub struct PeakDetector {
    params: DetectionParameters,
}

impl PeakDetector {
    pub fn new(params: DetectionParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &DetectionParameters {
        &self.params
    }

    /// Detects notches in a spectrum of any channel count.
    pub fn detect(&self, spectrum: &Raster) -> NotchSet {
        self.detect_intensity(&spectrum.intensity())
    }

    /// Detects notches in a single-channel intensity image.
    ///
    /// Results are in row-major scan order, each with `notch_radius`.
    pub fn detect_intensity(&self, intensity: &Plane<f32>) -> NotchSet {
        let desc = intensity.desc();
        if desc.is_empty() {
            return NotchSet::new();
        }

        let zone = DcZone::new(desc, self.params.protect_dc);
        let max_value = max_outside_zone(intensity, &zone);
        if max_value <= 0.0 {
            tracing::debug!(
                "No signal outside the DC zone in {}x{} spectrum",
                desc.width,
                desc.height
            );
            return NotchSet::new();
        }

        let radius = self.params.filter_radius();
        let filtered = maximum_filter(intensity, radius);
        let threshold = self.params.threshold_rel * max_value;
        let notch_radius = self.params.notch_radius.max(MIN_RADIUS);

        let mut peaks = NotchSet::new();
        for y in 0..desc.height {
            for x in 0..desc.width {
                let value = intensity[(x, y)];
                if value >= threshold && value == filtered[(x, y)] && !zone.contains(x, y) {
                    peaks.push(Circle::new(x as i32, y as i32, notch_radius));
                }
            }
        }

        tracing::debug!(
            "Detected {} peaks (max {:.4}, threshold {:.4}, window {})",
            peaks.len(),
            max_value,
            threshold,
            2 * radius + 1
        );

        peaks
    }
}

/// Maximum intensity over pixels outside `zone`; 0 when there are none.
fn max_outside_zone(intensity: &Plane<f32>, zone: &DcZone) -> f32 {
    let width = intensity.width();

    intensity
        .pixels()
        .par_chunks(width)
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(x, _)| !zone.contains(*x, y))
                .map(|(_, &v)| v)
                .fold(0.0f32, f32::max)
        })
        .reduce(|| 0.0f32, f32::max)
}
