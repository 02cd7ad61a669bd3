use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::format::FileFormat;
use crate::source::EncodedImage;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// Chooses where a download goes, typically by asking the user.
pub trait SaveTarget {
    /// `None` means the user cancelled.
    fn choose_path(&self, suggested_name: &str, format: FileFormat) -> Option<PathBuf>;
}

/// Always saves into a fixed directory under the suggested name.
#[derive(Clone, Debug)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveTarget for DirectoryTarget {
    fn choose_path(&self, suggested_name: &str, _format: FileFormat) -> Option<PathBuf> {
        Some(self.dir.join(suggested_name))
    }
}

pub fn write_artifact(path: &Path, image: &EncodedImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, image.bytes())?;
    info!(path = %path.display(), bytes = image.byte_len(), "artifact written");
    Ok(())
}

/// Ask `target` for a destination and write the artifact there.
pub fn save(
    target: &impl SaveTarget,
    image: &EncodedImage,
    suggested_name: &str,
) -> Result<SaveOutcome> {
    match target.choose_path(suggested_name, image.format()) {
        Some(path) => {
            write_artifact(&path, image)?;
            Ok(SaveOutcome::Saved(path))
        }
        None => Ok(SaveOutcome::Cancelled),
    }
}

/// Text of the notice shown after a successful save.
pub fn download_notice(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Download complete: {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cancel;

    impl SaveTarget for Cancel {
        fn choose_path(&self, _: &str, _: FileFormat) -> Option<PathBuf> {
            None
        }
    }

    fn png() -> EncodedImage {
        EncodedImage::encode(&image::DynamicImage::new_rgb8(3, 2), FileFormat::Png).unwrap()
    }

    #[test]
    fn test_cancel_writes_nothing() {
        assert_eq!(save(&Cancel, &png(), "x.png").unwrap(), SaveOutcome::Cancelled);
    }

    #[test]
    fn test_directory_target_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let img = png();
        let outcome = save(&DirectoryTarget::new(dir.path()), &img, "out-cropped.png").unwrap();
        let path = dir.path().join("out-cropped.png");
        assert_eq!(outcome, SaveOutcome::Saved(path.clone()));
        assert_eq!(std::fs::read(&path).unwrap(), img.bytes());
        assert_eq!(download_notice(&path), "Download complete: out-cropped.png");
    }
}
