// Command-line flags for the `mask-painter` binary.

use std::path::PathBuf;

use clap::Parser;

use inpaint_mask::StrokeMode;

/// Draw an inpainting mask over an image with the mouse.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Args {
    /// Image file to mask.
    #[arg(short, long, conflicts_with = "camera")]
    pub input: Option<PathBuf>,
    /// Take the image from this camera instead of a file.
    #[arg(short, long)]
    pub camera: Option<u32>,
    /// Requested camera resolution, as WIDTHxHEIGHT.
    #[arg(long, default_value = "640x480", value_parser = parse_resolution)]
    pub resolution: (u32, u32),
    /// Where the finalized mask is written.
    #[arg(short, long, default_value = "mask.png")]
    pub output: PathBuf,
    /// Keep every drag in the mask instead of only the latest one.
    #[arg(long)]
    pub accumulate: bool,
    /// Rasterize the mask on a worker thread.
    #[arg(long)]
    pub background: bool,
}

impl Args {
    pub fn stroke_mode(&self) -> StrokeMode {
        if self.accumulate { StrokeMode::Accumulate } else { StrokeMode::SingleStroke }
    }
}

fn parse_resolution(val: &str) -> Result<(u32, u32), String> {
    let (w, h) = val
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{val}'"))?;
    let w = w.trim().parse::<u32>().map_err(|_| format!("bad width '{w}'"))?;
    let h = h.trim().parse::<u32>().map_err(|_| format!("bad height '{h}'"))?;
    if w == 0 || h == 0 {
        return Err("width and height must be positive".to_string());
    }
    Ok((w, h))
}
