//! Notch - frequency-domain periodic noise suppression.
//!
//! Periodic interference in an image appears as isolated bright peaks in its
//! amplitude spectrum. This library builds the suppression side of a notch
//! filter:
//! - Automatic peak detection by local-maxima analysis
//! - Circular, optionally feathered, suppression masks
//! - Mask application and annotated previews
//! - An interactive editor for the notch set, with display-space mapping
//!
//! The forward and inverse transforms are out of scope; inputs are amplitude
//! spectra as `f32` rasters.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use notch::{auto_notch, DetectionParameters, NotchSetEditor};
//!
//! let out = auto_notch(&[spectrum], &DetectionParameters::default())?;
//!
//! // Hand the detections to an editor for manual touch-up.
//! let mut editor = NotchSetEditor::new(spectrum.desc(), 512.0, 512.0, Default::default());
//! editor.load(&out.peak_positions);
//! ```

mod color;
pub mod compositor;
mod config;
mod coords;
pub mod detection;
pub mod editor;
mod error;
pub mod mask;
mod math;
mod notch_set;
mod pipeline;
mod raster;

// ============================================================================
// Core types
// ============================================================================

pub use color::Color;
pub use coords::CoordinateMapper;
pub use error::{NotchError, Result};
pub use notch_set::{Circle, NotchSet, ParseError, DEFAULT_RADIUS, MIN_RADIUS};
pub use raster::{Plane, Raster, SpectrumDescriptor};

// ============================================================================
// Detection, masking and compositing
// ============================================================================

pub use compositor::{apply_mask, mask_image, render_preview};
pub use detection::{DcZone, DetectionParameters, PeakDetector};
pub use mask::{Mask, MaskSynthesizer};

// ============================================================================
// Editing and pipelines
// ============================================================================

pub use config::NotchConfig;
pub use editor::{
    Change, DragState, EditorAction, EditorSettings, NotchSetEditor, RenderFrame, RenderedCircle,
};
pub use pipeline::{
    auto_notch, manual_notch, AutoFrameOutput, AutoNotchOutput, FrameOutput, ManualNotchOutput,
};
