//! RGB color used for preview annotations.

/// Opaque RGB color with f32 components in range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Rec. 709 luminance, used when drawing onto single-channel images.
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn to_rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Outline color for notch rings.
    pub const NOTCH_RING: Color = Color::rgb(1.0, 0.9, 0.0);
    /// Outline color for the protected DC zone.
    pub const DC_RING: Color = Color::rgb(0.2, 0.5, 1.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
}

impl From<[f32; 3]> for Color {
    fn from(arr: [f32; 3]) -> Self {
        Self::rgb(arr[0], arr[1], arr[2])
    }
}
