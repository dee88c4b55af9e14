//! spectrum-notch CLI: detect and suppress periodic-noise peaks in amplitude
//! spectrum images.

mod image_io;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use notch::{auto_notch, manual_notch, FrameOutput, NotchConfig, Raster};

use crate::image_io::{load_raster, save_raster};

#[derive(Parser)]
#[command(name = "spectrum-notch")]
#[command(about = "Suppress periodic noise peaks in FFT amplitude spectrum images")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect peaks automatically and mask them.
    Auto(AutoArgs),

    /// Mask notches listed in a JSON file.
    Manual(ManualArgs),
}

#[derive(Debug, Clone, Args)]
struct IoArgs {
    /// Amplitude spectrum image.
    #[arg(long)]
    input: PathBuf,

    /// Directory for output images.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct AutoArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Settings file (.toml or .json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Peak threshold relative to the strongest non-DC value, in (0, 1].
    #[arg(long)]
    threshold_rel: Option<f32>,

    /// Minimum distance between peaks in pixels.
    #[arg(long)]
    min_distance: Option<usize>,

    /// Radius of each notch in pixels.
    #[arg(long)]
    notch_radius: Option<f32>,

    /// Radius around the DC center ignored by detection.
    #[arg(long)]
    protect_dc: Option<f32>,

    /// Gaussian sigma of the mask edge; 0 for hard edges.
    #[arg(long)]
    feather: Option<f32>,
}

#[derive(Debug, Clone, Args)]
struct ManualArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Notch list, e.g. the peaks.json written by `auto`.
    #[arg(long)]
    points: PathBuf,

    /// Gaussian sigma of the mask edge; 0 for hard edges.
    #[arg(long, default_value_t = 2.0)]
    feather: f32,

    /// Radius of an extra disk masked at the DC center; 0 disables it.
    #[arg(long, default_value_t = 0.0)]
    protect_dc: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging(&cli.log_level, "spectrum_notch")?;

    match cli.command {
        Commands::Auto(args) => run_auto(&args),
        Commands::Manual(args) => run_manual(&args),
    }
}

fn run_auto(args: &AutoArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => NotchConfig::load(path)?,
        None => NotchConfig::default(),
    };

    let params = &mut config.detection;
    if let Some(v) = args.threshold_rel {
        params.threshold_rel = v;
    }
    if let Some(v) = args.min_distance {
        params.min_distance = v;
    }
    if let Some(v) = args.notch_radius {
        params.notch_radius = v;
    }
    if let Some(v) = args.protect_dc {
        params.protect_dc = v;
    }
    if let Some(v) = args.feather {
        params.feather = v;
    }

    let spectrum = load_raster(&args.io.input)?;
    let out = auto_notch(std::slice::from_ref(&spectrum), &config.detection)?;

    prepare_out_dir(&args.io.out_dir)?;
    for frame in &out.frames {
        write_frame(&frame.frame, &args.io.out_dir)?;
        save_raster(&frame.preview, &args.io.out_dir.join("preview.png"))?;
    }

    let peaks_path = args.io.out_dir.join("peaks.json");
    std::fs::write(&peaks_path, &out.peak_positions)
        .with_context(|| format!("Failed to write {}", peaks_path.display()))?;

    tracing::info!("Wrote results to {}", args.io.out_dir.display());
    Ok(())
}

fn run_manual(args: &ManualArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.points)
        .with_context(|| format!("Failed to read {}", args.points.display()))?;

    let spectrum: Raster = load_raster(&args.io.input)?;
    let out = manual_notch(
        std::slice::from_ref(&spectrum),
        &text,
        args.feather,
        args.protect_dc,
    )?;

    prepare_out_dir(&args.io.out_dir)?;
    for frame in &out.frames {
        write_frame(frame, &args.io.out_dir)?;
    }

    tracing::info!(
        "Applied {} notch(es), results in {}",
        out.notches.len(),
        args.io.out_dir.display()
    );
    Ok(())
}

fn prepare_out_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))
}

fn write_frame(frame: &FrameOutput, dir: &Path) -> anyhow::Result<()> {
    save_raster(&frame.filtered, &dir.join("filtered.png"))?;
    save_raster(&frame.mask_image, &dir.join("mask.png"))?;
    Ok(())
}
