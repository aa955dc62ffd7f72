use clap::Parser;
use image::imageops::FilterType;
use image::Rgba;
use pindmd2::display_constants::{DMD_PIXEL_HEIGHT, DMD_PIXEL_WIDTH};
use pindmd2::{monochrome, PinDmd2};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
struct Args {
    /// image to show on the display
    file: PathBuf,
    /// tint color as RRGGBB hex, applied to the preview
    #[clap(long)]
    tint: Option<String>,
    /// write the reduced (and tinted) image to this file
    #[clap(long)]
    preview_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_max_level(LevelFilter::INFO).init();
    let args = Args::parse();

    let img = image::open(&args.file)?;
    info!("Opened image {}", args.file.display());
    let img = img.resize_to_fill(DMD_PIXEL_WIDTH, DMD_PIXEL_HEIGHT, FilterType::Lanczos3);
    info!("Resized to {DMD_PIXEL_WIDTH}x{DMD_PIXEL_HEIGHT}");

    let tint = match &args.tint {
        Some(hex) => parse_tint(hex)?,
        None => Rgba([0, 0, 0, 0]),
    };

    let gray = monochrome::grayscale(&img)?;
    if let Some(preview) = &args.preview_file {
        monochrome::shade(&gray, tint).save(preview)?;
        info!("Preview written to {}", preview.display());
    }

    let mut dmd = PinDmd2::new();
    dmd.init()?;
    if !dmd.is_available() {
        return Err("no pinDMD v2 device attached".into());
    }
    dmd.render(&gray)?;
    info!("Frame sent");
    Ok(())
}

/// parse an RRGGBB hex triplet into an enabled tint
fn parse_tint(hex: &str) -> Result<Rgba<u8>, Box<dyn Error>> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("invalid tint {hex:?}, expected RRGGBB").into());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[2 * i..2 * i + 2], 16);
    Ok(Rgba([channel(0)?, channel(1)?, channel(2)?, 0xFF]))
}
