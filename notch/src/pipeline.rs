//! Batch entry points mirroring the automatic and manual notch stages.
//!
//! Frames are independent and processed in parallel. The automatic stage
//! reports the detections of the first frame as `peak_positions` text, which
//! can be loaded into an editor verbatim.

use rayon::prelude::*;

use crate::compositor::{apply_mask, mask_image, render_preview};
use crate::detection::{DetectionParameters, PeakDetector};
use crate::error::Result;
use crate::mask::{Mask, MaskSynthesizer};
use crate::notch_set::NotchSet;
use crate::raster::Raster;

/// Outputs for one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub filtered: Raster,
    pub mask: Mask,
    pub mask_image: Raster,
}

#[derive(Debug, Clone)]
pub struct AutoFrameOutput {
    pub frame: FrameOutput,
    pub notches: NotchSet,
    pub preview: Raster,
}

#[derive(Debug, Clone)]
pub struct AutoNotchOutput {
    pub frames: Vec<AutoFrameOutput>,
    /// Serialized detections of the first frame, `[]` for an empty batch.
    pub peak_positions: String,
}

#[derive(Debug, Clone)]
pub struct ManualNotchOutput {
    pub frames: Vec<FrameOutput>,
    /// The notch set actually applied after tolerant parsing.
    pub notches: NotchSet,
}

/// Detects notches per frame and suppresses them.
pub fn auto_notch(frames: &[Raster], params: &DetectionParameters) -> Result<AutoNotchOutput> {
    let detector = PeakDetector::new(*params)?;
    let synthesizer = MaskSynthesizer::new(params.feather, 0.0)?;

    let frames = frames
        .par_iter()
        .map(|spectrum| {
            let notches = detector.detect(spectrum);
            let frame = filter_frame(spectrum, &notches, &synthesizer)?;
            let preview = render_preview(spectrum, &notches, params.protect_dc);
            Ok(AutoFrameOutput {
                frame,
                notches,
                preview,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let peak_positions = frames
        .first()
        .map_or_else(|| NotchSet::new().serialize(), |f| f.notches.serialize());

    tracing::info!(
        "Auto notch processed {} frame(s), {} notch(es) in the first",
        frames.len(),
        frames.first().map_or(0, |f| f.notches.len())
    );

    Ok(AutoNotchOutput {
        frames,
        peak_positions,
    })
}

/// Applies notches given as exchange text to every frame.
///
/// Malformed text is treated as an empty set. `protect_dc > 0` also
/// suppresses a disk of that radius at the DC center.
pub fn manual_notch(
    frames: &[Raster],
    notch_text: &str,
    feather: f32,
    protect_dc: f32,
) -> Result<ManualNotchOutput> {
    let notches = NotchSet::parse_or_empty(notch_text);
    let synthesizer = MaskSynthesizer::new(feather, protect_dc)?;

    let frames = frames
        .par_iter()
        .map(|spectrum| filter_frame(spectrum, &notches, &synthesizer))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        "Manual notch applied {} notch(es) to {} frame(s)",
        notches.len(),
        frames.len()
    );

    Ok(ManualNotchOutput { frames, notches })
}

fn filter_frame(
    spectrum: &Raster,
    notches: &NotchSet,
    synthesizer: &MaskSynthesizer,
) -> Result<FrameOutput> {
    let mask = synthesizer.synthesize(notches, spectrum.desc());
    let filtered = apply_mask(spectrum, &mask)?;
    let mask_image = mask_image(&mask);
    Ok(FrameOutput {
        filtered,
        mask,
        mask_image,
    })
}
