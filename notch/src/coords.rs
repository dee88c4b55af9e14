//! Mapping between spectrum pixel space and an editor display surface.

use glam::{IVec2, Vec2};

use crate::raster::SpectrumDescriptor;

/// Bidirectional transform between spectrum pixels and display pixels.
///
/// Positions scale independently per axis; radii use the smaller of the two
/// axis scales so circles stay circular under non-uniform stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    spec_size: Vec2,
    disp_size: Vec2,
}

impl CoordinateMapper {
    /// All four dimensions must be positive.
    pub fn new(spec: SpectrumDescriptor, disp_width: f32, disp_height: f32) -> Self {
        debug_assert!(!spec.is_empty(), "spectrum dimensions must be positive");
        debug_assert!(
            disp_width > 0.0 && disp_height > 0.0,
            "display dimensions must be positive"
        );

        Self {
            spec_size: Vec2::new(spec.width as f32, spec.height as f32),
            disp_size: Vec2::new(disp_width, disp_height),
        }
    }

    #[inline]
    pub fn display_size(&self) -> Vec2 {
        self.disp_size
    }

    /// Spectrum position to display position. Not clamped.
    #[inline]
    pub fn to_display(&self, spectrum: Vec2) -> Vec2 {
        spectrum / self.spec_size * self.disp_size
    }

    /// Display position to the nearest spectrum pixel.
    ///
    /// Rounds half away from zero on each axis.
    #[inline]
    pub fn to_spectrum(&self, display: Vec2) -> IVec2 {
        let p = display / self.disp_size * self.spec_size;
        IVec2::new(p.x.round() as i32, p.y.round() as i32)
    }

    /// Display pixels per spectrum pixel for radii.
    #[inline]
    pub fn radius_scale(&self) -> f32 {
        (self.disp_size / self.spec_size).min_element()
    }

    #[inline]
    pub fn radius_to_display(&self, r: f32) -> f32 {
        r * self.radius_scale()
    }

    #[inline]
    pub fn radius_to_spectrum(&self, d: f32) -> f32 {
        d / self.radius_scale()
    }
}
