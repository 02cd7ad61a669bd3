use std::fmt;
use std::str::FromStr;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::ReaperError;

/// Encoded image formats the editor reads and writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    Bmp,
    #[serde(rename = "webp")]
    WebP,
    Ico,
    Tiff,
    Tga,
}

impl FileFormat {
    pub const ALL: &[Self] = &[
        Self::Png,
        Self::Jpeg,
        Self::Gif,
        Self::Bmp,
        Self::WebP,
        Self::Ico,
        Self::Tiff,
        Self::Tga,
    ];

    /// Canonical lowercase name, also used as the download extension.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::WebP => "webp",
            Self::Ico => "ico",
            Self::Tiff => "tiff",
            Self::Tga => "tga",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.name()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::WebP => "image/webp",
            Self::Ico => "image/vnd.microsoft.icon",
            Self::Tiff => "image/tiff",
            Self::Tga => "image/x-tga",
        }
    }

    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/bmp" => Some(Self::Bmp),
            "image/webp" => Some(Self::WebP),
            "image/vnd.microsoft.icon" | "image/x-icon" => Some(Self::Ico),
            "image/tiff" => Some(Self::Tiff),
            "image/x-tga" => Some(Self::Tga),
            _ => None,
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
            Self::WebP => ImageFormat::WebP,
            Self::Ico => ImageFormat::Ico,
            Self::Tiff => ImageFormat::Tiff,
            Self::Tga => ImageFormat::Tga,
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Ico => Some(Self::Ico),
            ImageFormat::Tiff => Some(Self::Tiff),
            ImageFormat::Tga => Some(Self::Tga),
            _ => None,
        }
    }
}

impl FromStr for FileFormat {
    type Err = ReaperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            "bmp" => Ok(Self::Bmp),
            "webp" => Ok(Self::WebP),
            "ico" => Ok(Self::Ico),
            "tiff" | "tif" => Ok(Self::Tiff),
            "tga" => Ok(Self::Tga),
            other => Err(ReaperError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
            Self::Gif => write!(f, "GIF"),
            Self::Bmp => write!(f, "BMP"),
            Self::WebP => write!(f, "WEBP"),
            Self::Ico => write!(f, "ICO"),
            Self::Tiff => write!(f, "TIFF"),
            Self::Tga => write!(f, "TGA"),
        }
    }
}
