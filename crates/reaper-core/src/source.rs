use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::{debug, info};

use crate::error::{ReaperError, Result};
use crate::format::FileFormat;
use crate::geometry::ImageSize;

/// Encoded image bytes together with their detected format and dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    format: FileFormat,
    size: ImageSize,
}

impl EncodedImage {
    /// Wrap raw bytes, detecting the format from content and reading the
    /// dimensions from the header. Pixel data is not decoded.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let detected = image::guess_format(&bytes)?;
        let format = FileFormat::from_image_format(detected)
            .ok_or_else(|| ReaperError::UnsupportedFormat(format!("{detected:?}")))?;
        Self::from_bytes_with_format(bytes, format)
    }

    /// Like [`EncodedImage::from_bytes`] for formats without a magic number
    /// (TGA), where the caller knows the format from the file name.
    pub fn from_bytes_with_format(bytes: Vec<u8>, format: FileFormat) -> Result<Self> {
        let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format.image_format())
            .into_dimensions()?;
        if width == 0 || height == 0 {
            return Err(ReaperError::InvalidDimensions { width, height });
        }

        Ok(Self {
            bytes,
            format,
            size: ImageSize::new(width, height),
        })
    }

    /// Encode a decoded image into `format`, adapting the pixel layout to
    /// what the encoder accepts.
    pub fn encode(img: &DynamicImage, format: FileFormat) -> Result<Self> {
        let prepared = match format {
            FileFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
            FileFormat::Gif | FileFormat::Ico | FileFormat::WebP => {
                DynamicImage::ImageRgba8(img.to_rgba8())
            }
            _ => img.clone(),
        };

        let mut buffer = Cursor::new(Vec::new());
        prepared.write_to(&mut buffer, format.image_format())?;
        Ok(Self {
            bytes: buffer.into_inner(),
            format,
            size: ImageSize::new(img.width(), img.height()),
        })
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        let img = image::load_from_memory_with_format(&self.bytes, self.format.image_format())?;
        Ok(img)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }
}

/// The image a view edits. Immutable once loaded; replaced wholesale.
#[derive(Clone, Debug)]
pub struct SourceImage {
    image: Arc<EncodedImage>,
    file_name: Option<String>,
}

impl SourceImage {
    pub fn new(image: EncodedImage, file_name: Option<String>) -> Self {
        Self {
            image: Arc::new(image),
            file_name,
        }
    }

    /// Build from dropped or picked bytes.
    pub fn from_bytes(bytes: Vec<u8>, file_name: Option<String>) -> Result<Self> {
        let hinted = file_name
            .as_deref()
            .and_then(|n| ImageFormat::from_path(n).ok())
            .and_then(FileFormat::from_image_format);
        let image = match (image::guess_format(&bytes), hinted) {
            (Err(_), Some(format)) => EncodedImage::from_bytes_with_format(bytes, format)?,
            _ => EncodedImage::from_bytes(bytes)?,
        };
        debug!(
            name = file_name.as_deref().unwrap_or("<unnamed>"),
            format = %image.format(),
            size = %image.size(),
            "source decoded"
        );
        Ok(Self::new(image, file_name))
    }

    pub fn image(&self) -> &Arc<EncodedImage> {
        &self.image
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn size(&self) -> ImageSize {
        self.image.size()
    }

    pub fn format(&self) -> FileFormat {
        self.image.format()
    }
}

/// Read an image file from disk.
pub fn load_path(path: &Path) -> Result<SourceImage> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string);
    let source = SourceImage::from_bytes(bytes, file_name)?;
    info!(
        path = %path.display(),
        size = %source.size(),
        format = %source.format(),
        "loaded source image"
    );
    Ok(source)
}
