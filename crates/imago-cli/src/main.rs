//! imago-crop - crop an image by fixed margins and re-encode it.
//!
//! Examples:
//!
//! ```text
//! # Trim 100 px from the top and 200 px from the left, write JPEG
//! imago-crop -i in.jpg -o out.jpg --top 100 --left 200
//!
//! # Trim 10% from each side, write PNG
//! imago-crop -i in.jpg -o out.png --outformat png --left 10% --right 10%
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use imago_core::{
    apply_crop, compute_crop, decode_image, encode_image, resolve_offset, OutputFormat,
};

#[derive(Parser)]
#[command(name = "imago-crop")]
#[command(author, version, about = "Crop an image by fixed margins on each edge")]
struct Cli {
    /// Input image path (JPEG, PNG, or GIF, auto-detected)
    #[arg(short, long)]
    input: PathBuf,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    /// Left offset: pixels ("200") or percentage of width ("10%")
    #[arg(long, default_value = "0")]
    left: String,

    /// Top offset: pixels or percentage of height
    #[arg(long, default_value = "0")]
    top: String,

    /// Right offset: pixels or percentage of width
    #[arg(long, default_value = "0")]
    right: String,

    /// Bottom offset: pixels or percentage of height
    #[arg(long, default_value = "0")]
    bottom: String,

    /// Minimum output width in pixels; left/right margins shrink
    /// symmetrically to honor it (0 = unconstrained)
    #[arg(long, default_value_t = 0)]
    min_width: u32,

    /// Output format: "jpeg" (alias "jpg") or "png", case-insensitive
    #[arg(long, default_value = "jpeg")]
    outformat: String,

    /// JPEG quality (1-100); ignored for PNG output
    #[arg(long, default_value_t = 85)]
    quality: u8,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.outformat.parse()?;

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read input file {}", cli.input.display()))?;
    let image = decode_image(&bytes)
        .with_context(|| format!("failed to decode {}", cli.input.display()))?;
    let dims = image.dimensions();
    info!(width = dims.width, height = dims.height, "decoded input image");

    let left = resolve_offset(&cli.left, dims.width).context("invalid --left offset")?;
    let top = resolve_offset(&cli.top, dims.height).context("invalid --top offset")?;
    let right = resolve_offset(&cli.right, dims.width).context("invalid --right offset")?;
    let bottom = resolve_offset(&cli.bottom, dims.height).context("invalid --bottom offset")?;
    debug!(left, top, right, bottom, "resolved edge offsets");

    let rect = compute_crop(left, top, right, bottom, cli.min_width, dims)
        .context("cannot compute a usable crop rectangle")?;
    info!(
        width = rect.width,
        height = rect.height,
        left = rect.left,
        top = rect.top,
        "computed crop rectangle"
    );

    let cropped = apply_crop(&image, &rect).context("cannot apply the crop rectangle")?;
    let encoded = encode_image(&cropped, format, cli.quality)
        .with_context(|| format!("failed to encode output as {:?}", format))?;

    fs::write(&cli.output, &encoded)
        .with_context(|| format!("failed to write output file {}", cli.output.display()))?;
    info!(
        bytes = encoded.len(),
        path = %cli.output.display(),
        "wrote cropped image"
    );

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}
