use tracing::debug;

use super::request::EditParams;
use crate::config::ResizeFilter;
use crate::consts::MAX_DIMENSION;
use crate::error::{ReaperError, Result};
use crate::format::FileFormat;
use crate::geometry::CropRect;
use crate::source::EncodedImage;

/// The pixel-processing service behind the edit views.
///
/// Each call is request/response and at-most-once; implementations run on
/// the dispatcher's worker thread.
pub trait ProcessingBackend: Send + Sync + 'static {
    fn crop(&self, image: &EncodedImage, rect: CropRect) -> Result<EncodedImage>;

    fn resize(&self, image: &EncodedImage, width: u32, height: u32) -> Result<EncodedImage>;

    fn convert(&self, image: &EncodedImage, target: FileFormat) -> Result<EncodedImage>;

    /// Route typed parameters to the matching operation.
    fn run(&self, image: &EncodedImage, params: &EditParams) -> Result<EncodedImage> {
        match params {
            EditParams::Crop(rect) => self.crop(image, *rect),
            EditParams::Resize { width, height } => self.resize(image, *width, *height),
            EditParams::Convert { target } => self.convert(image, *target),
        }
    }
}

/// Resize targets must be non-zero and no larger than [`MAX_DIMENSION`].
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    let valid = |d: u32| (1..=MAX_DIMENSION).contains(&d);
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ReaperError::InvalidDimensions { width, height })
    }
}

/// In-process backend built on the `image` crate.
///
/// Crop and resize keep the source format; convert re-encodes into the
/// target format.
#[derive(Clone, Debug, Default)]
pub struct LocalBackend {
    filter: ResizeFilter,
}

impl LocalBackend {
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }
}

impl ProcessingBackend for LocalBackend {
    fn crop(&self, image: &EncodedImage, rect: CropRect) -> Result<EncodedImage> {
        if !rect.fits_within(image.size()) {
            return Err(ReaperError::InvalidSelection(format!(
                "crop {rect} exceeds source dimensions {}",
                image.size()
            )));
        }
        let decoded = image.decode()?;
        let cropped = decoded.crop_imm(rect.x, rect.y, rect.width, rect.height);
        debug!(%rect, "cropped");
        EncodedImage::encode(&cropped, image.format())
    }

    fn resize(&self, image: &EncodedImage, width: u32, height: u32) -> Result<EncodedImage> {
        check_dimensions(width, height)?;
        let decoded = image.decode()?;
        let resized = decoded.resize_exact(width, height, self.filter.filter_type());
        debug!(width, height, filter = %self.filter, "resized");
        EncodedImage::encode(&resized, image.format())
    }

    fn convert(&self, image: &EncodedImage, target: FileFormat) -> Result<EncodedImage> {
        let decoded = image.decode()?;
        debug!(from = %image.format(), to = %target, "converting");
        EncodedImage::encode(&decoded, target)
    }
}
