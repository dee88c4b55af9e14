use thiserror::Error;

use crate::notch_set::ParseError;

/// Errors surfaced by the notch core.
///
/// Degenerate spectra, out-of-range circles and missed hit tests are not
/// errors; they resolve to empty or unchanged results.
#[derive(Debug, Error)]
pub enum NotchError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Failed to parse notch set: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, NotchError>;
