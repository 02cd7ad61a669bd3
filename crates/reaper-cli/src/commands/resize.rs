use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use reaper_core::config::{EditorConfig, ResizeFilter};
use reaper_core::edit::{EditParams, LocalBackend, ProcessingBackend};
use reaper_core::metadata::{suggested_name, ImageMetadata};
use reaper_core::source::load_path;

use super::{output_path, write_output};
use crate::summary::{print_metadata, print_saved};

#[derive(Clone, ValueEnum)]
pub enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<&FilterArg> for ResizeFilter {
    fn from(arg: &FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => ResizeFilter::Nearest,
            FilterArg::Triangle => ResizeFilter::Triangle,
            FilterArg::CatmullRom => ResizeFilter::CatmullRom,
            FilterArg::Gaussian => ResizeFilter::Gaussian,
            FilterArg::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Input image file
    pub file: PathBuf,

    /// Target width in pixels
    #[arg(long)]
    pub width: u32,

    /// Target height in pixels
    #[arg(long)]
    pub height: u32,

    /// Resampling filter (defaults to the configured one)
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Output file (defaults to <stem>-<w>x<h>.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ResizeArgs, config: &EditorConfig) -> Result<()> {
    let source =
        load_path(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;
    let filter = args
        .filter
        .as_ref()
        .map(ResizeFilter::from)
        .unwrap_or(config.resize_filter);

    println!(
        "Resizing {} from {} to {}x{} ({filter})",
        args.file.display(),
        source.size(),
        args.width,
        args.height
    );
    let resized = LocalBackend::new(filter).resize(source.image(), args.width, args.height)?;

    let params = EditParams::Resize {
        width: args.width,
        height: args.height,
    };
    let name = suggested_name(source.file_name(), &params, resized.format());
    let path = output_path(&args.file, args.output.as_deref(), None, &name);
    write_output(&path, &resized)?;

    print_metadata("Result", &ImageMetadata::of(&resized, None));
    print_saved(&path);
    Ok(())
}
