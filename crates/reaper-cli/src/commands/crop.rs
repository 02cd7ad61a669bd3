use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use reaper_core::edit::{EditParams, LocalBackend, ProcessingBackend};
use reaper_core::geometry::{CropRect, CropRegion, Size};
use reaper_core::metadata::{suggested_name, ImageMetadata};
use reaper_core::source::load_path;
use reaper_core::viewport::{map_to_source, ViewportTransform};

use super::{output_path, parse_dimensions, parse_rect, write_output};
use crate::summary::{print_metadata, print_saved};

#[derive(Args)]
pub struct CropArgs {
    /// Input image file
    pub file: PathBuf,

    /// Rectangle as x,y,width,height. Source pixels, unless --display is given
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    pub rect: [f64; 4],

    /// Size (WxH) the image was shown at when the rectangle was drawn
    #[arg(long, value_parser = parse_dimensions)]
    pub display: Option<(u32, u32)>,

    /// Output file (defaults to <stem>-cropped.<ext> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let source =
        load_path(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;
    let [x, y, w, h] = args.rect;
    let region = CropRegion::new(x, y, w, h);

    let rect = match args.display {
        Some((dw, dh)) => map_to_source(
            &region,
            &ViewportTransform::default(),
            source.size(),
            Size::new(dw as f64, dh as f64),
        )?,
        None => pixel_rect(region)?,
    };
    println!("Cropping {} to {rect}", args.file.display());

    let cropped = LocalBackend::default().crop(source.image(), rect)?;
    let name = suggested_name(source.file_name(), &EditParams::Crop(rect), cropped.format());
    let path = output_path(&args.file, args.output.as_deref(), None, &name);
    write_output(&path, &cropped)?;

    print_metadata("Result", &ImageMetadata::of(&cropped, None));
    print_saved(&path);
    Ok(())
}

fn pixel_rect(region: CropRegion) -> Result<CropRect> {
    let CropRegion { x, y, width, height } = region;
    if [x, y, width, height].iter().any(|v| *v < 0.0 || v.fract() != 0.0) {
        bail!("pixel rectangle must be non-negative integers, got {x},{y},{width},{height}");
    }
    Ok(CropRect::new(x as u32, y as u32, width as u32, height as u32))
}
