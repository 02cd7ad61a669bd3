use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use reaper_core::metadata::ImageMetadata;
use reaper_core::source::load_path;

use crate::summary::print_metadata;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    for (i, file) in args.files.iter().enumerate() {
        let source =
            load_path(file).with_context(|| format!("Failed to read {}", file.display()))?;
        if i > 0 {
            println!();
        }
        let meta = ImageMetadata::of(source.image(), source.file_name());
        print_metadata(&file.display().to_string(), &meta);
        println!("  {:<14}{}", "MIME", source.format().mime_type());
    }
    Ok(())
}
