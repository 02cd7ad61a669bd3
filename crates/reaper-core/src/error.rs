use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("No source image loaded")]
    NoSource,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, ReaperError>;
