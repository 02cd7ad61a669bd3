use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use reaper_core::config::EditorConfig;
use reaper_core::edit::{EditParams, LocalBackend, ProcessingBackend};
use reaper_core::format::FileFormat;
use reaper_core::metadata::suggested_name;
use reaper_core::source::load_path;

use super::{output_path, write_output};
use crate::summary::Styles;

#[derive(Args)]
pub struct ConvertArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Target format (png, jpeg/jpg, gif, bmp, webp, ico, tiff, tga)
    #[arg(long = "to")]
    pub target: Option<FileFormat>,

    /// Directory for converted files (defaults to each input's directory)
    #[arg(short = 'd', long)]
    pub out_dir: Option<PathBuf>,
}

pub fn run(args: &ConvertArgs, config: &EditorConfig) -> Result<()> {
    let target = args.target.unwrap_or(config.default_convert_format);
    let backend = LocalBackend::new(config.resize_filter);

    if let Some(ref dir) = args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    println!("Converting {} file(s) to {target}", args.files.len());
    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Converting [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let results: Vec<(&PathBuf, Result<PathBuf>)> = args
        .files
        .par_iter()
        .map(|file| {
            let outcome = convert_one(&backend, file, target, args.out_dir.as_deref());
            pb.inc(1);
            (file, outcome)
        })
        .collect();
    pb.finish();

    let s = Styles::new();
    let mut failed = 0;
    for (file, outcome) in &results {
        match outcome {
            Ok(path) => println!("  {} -> {}", file.display(), s.path.apply_to(path.display())),
            Err(e) => {
                failed += 1;
                println!("  {} {}: {e:#}", s.error.apply_to("failed"), file.display());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} conversions failed", results.len());
    }
    Ok(())
}

fn convert_one(
    backend: &LocalBackend,
    file: &Path,
    target: FileFormat,
    out_dir: Option<&Path>,
) -> Result<PathBuf> {
    let source = load_path(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let converted = backend.convert(source.image(), target)?;
    let name = suggested_name(
        source.file_name(),
        &EditParams::Convert { target },
        converted.format(),
    );
    let path = output_path(file, None, out_dir, &name);
    if path == file {
        bail!("output would overwrite the input; pass --out-dir");
    }
    write_output(&path, &converted)?;
    Ok(path)
}
