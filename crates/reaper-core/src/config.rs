use std::fmt;
use std::path::Path;
use std::time::Duration;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::consts::{CROP_DEBOUNCE, NOTICE_DURATION};
use crate::error::{ReaperError, Result};
use crate::format::FileFormat;

/// Resampling filter used by resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    pub fn filter_type(&self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Triangle => write!(f, "Triangle"),
            Self::CatmullRom => write!(f, "Catmull-Rom"),
            Self::Gaussian => write!(f, "Gaussian"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// User-tunable editor settings, stored as TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period before a dragged crop rectangle is committed.
    pub crop_debounce_ms: u64,
    pub resize_filter: ResizeFilter,
    /// Format preselected in the convert view.
    pub default_convert_format: FileFormat,
    /// How long completion notices stay visible.
    pub notice_duration_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            crop_debounce_ms: CROP_DEBOUNCE.as_millis() as u64,
            resize_filter: ResizeFilter::default(),
            default_convert_format: FileFormat::default(),
            notice_duration_ms: NOTICE_DURATION.as_millis() as u64,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ReaperError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ReaperError::Config(e.to_string()))
    }

    pub fn crop_debounce(&self) -> Duration {
        Duration::from_millis(self.crop_debounce_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}
