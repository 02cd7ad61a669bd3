use std::path::Path;

use crate::consts::{DEFAULT_CONVERT_STEM, DEFAULT_STEM, SIZE_UNIT};
use crate::edit::EditParams;
use crate::format::FileFormat;
use crate::geometry::ImageSize;
use crate::source::EncodedImage;

/// Facts shown in the side panel for a source image or a result artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageMetadata {
    pub name: Option<String>,
    pub byte_len: u64,
    pub format: FileFormat,
    pub size: ImageSize,
}

impl ImageMetadata {
    pub fn of(image: &EncodedImage, name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            byte_len: image.byte_len(),
            format: image.format(),
            size: image.size(),
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::with_capacity(4);
        if let Some(ref name) = self.name {
            rows.push(("Name", name.clone()));
        }
        rows.push(("Size", format_file_size(self.byte_len)));
        rows.push(("Format", self.format.to_string()));
        rows.push(("Dimensions", self.size.to_string()));
        rows
    }
}

/// Human-readable size: bytes, then KB (1 dp), MB and GB (2 dp), base 1024.
pub fn format_file_size(bytes: u64) -> String {
    let kb = SIZE_UNIT;
    let mb = kb * SIZE_UNIT;
    let gb = mb * SIZE_UNIT;
    if bytes < kb {
        format!("{bytes} B")
    } else if bytes < mb {
        format!("{:.1} KB", bytes as f64 / kb as f64)
    } else if bytes < gb {
        format!("{:.2} MB", bytes as f64 / mb as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / gb as f64)
    }
}

/// Download name offered in the save dialog for a finished edit.
///
/// `source_name` is the original file name; `artifact_format` is the format
/// the backend produced.
pub fn suggested_name(
    source_name: Option<&str>,
    params: &EditParams,
    artifact_format: FileFormat,
) -> String {
    let stem = source_name
        .and_then(|n| Path::new(n).file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty());
    let ext = artifact_format.extension();

    match params {
        EditParams::Crop(_) => format!("{}-cropped.{ext}", stem.unwrap_or(DEFAULT_STEM)),
        EditParams::Resize { width, height } => {
            format!("{}-{width}x{height}.{ext}", stem.unwrap_or(DEFAULT_STEM))
        }
        EditParams::Convert { target } => {
            format!("{}.{}", stem.unwrap_or(DEFAULT_CONVERT_STEM), target.extension())
        }
    }
}
