use std::sync::Arc;

use crate::edit::{EditParams, EditState, EditStatus};
use crate::metadata::{suggested_name, ImageMetadata};
use crate::source::{EncodedImage, SourceImage};

/// Read-only view of what an edit view has to show: the source, and either
/// the finished artifact or the last error.
pub struct ResultPresenter<'a> {
    source: &'a SourceImage,
    state: &'a EditState,
}

impl<'a> ResultPresenter<'a> {
    pub fn new(source: &'a SourceImage, state: &'a EditState) -> Self {
        Self { source, state }
    }

    pub fn in_result_mode(&self) -> bool {
        self.state.in_result_mode()
    }

    pub fn artifact(&self) -> Option<&'a Arc<EncodedImage>> {
        self.state.artifact()
    }

    pub fn error(&self) -> Option<&'a str> {
        self.state.error()
    }

    pub fn source_metadata(&self) -> ImageMetadata {
        ImageMetadata::of(self.source.image(), self.source.file_name())
    }

    pub fn artifact_metadata(&self) -> Option<ImageMetadata> {
        self.artifact().map(|a| ImageMetadata::of(a, None))
    }

    fn params(&self) -> Option<&'a EditParams> {
        match self.state.status() {
            EditStatus::Succeeded { params, .. } => Some(params),
            _ => None,
        }
    }

    /// File name offered by the save dialog.
    pub fn download_name(&self) -> Option<String> {
        let artifact = self.artifact()?;
        let params = self.params()?;
        Some(suggested_name(self.source.file_name(), params, artifact.format()))
    }
}
