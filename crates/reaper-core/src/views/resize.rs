use tracing::info;

use crate::edit::backend::check_dimensions;
use crate::edit::{EditDispatcher, EditParams, EditStatus, RequestId};
use crate::error::{ReaperError, Result};
use crate::source::SourceImage;

use super::result::ResultPresenter;

/// Resize editor: target width and height, one request at a time.
pub struct ResizeView {
    source: Option<SourceImage>,
    width: u32,
    height: u32,
    dispatcher: EditDispatcher,
}

impl ResizeView {
    pub fn new(dispatcher: EditDispatcher) -> Self {
        Self {
            source: None,
            width: 0,
            height: 0,
            dispatcher,
        }
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn status(&self) -> &EditStatus {
        self.dispatcher.status()
    }

    pub fn is_pending(&self) -> bool {
        self.dispatcher.is_pending()
    }

    pub fn is_editable(&self) -> bool {
        self.source.is_some() && self.dispatcher.state().accepts_submit()
    }

    pub fn set_source(&mut self, source: SourceImage) {
        self.dispatcher.clear();
        self.width = 0;
        self.height = 0;
        self.source = Some(source);
    }

    /// Inputs are frozen while a request is in flight or a result is shown.
    pub fn set_dimensions(&mut self, width: u32, height: u32) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn submit(&mut self) -> Result<Option<RequestId>> {
        let source = self.source.as_ref().ok_or(ReaperError::NoSource)?;
        check_dimensions(self.width, self.height)?;
        let params = EditParams::Resize {
            width: self.width,
            height: self.height,
        };
        Ok(self.dispatcher.submit(source.image().clone(), params))
    }

    pub fn poll(&mut self) -> bool {
        self.dispatcher.poll()
    }

    pub fn dismiss_result(&mut self) {
        self.dispatcher.clear();
    }

    pub fn clear(&mut self) {
        self.dispatcher.clear();
        self.width = 0;
        self.height = 0;
        self.source = None;
        info!("resize view cleared");
    }

    pub fn presenter(&self) -> Option<ResultPresenter<'_>> {
        let state = self.dispatcher.state();
        self.source.as_ref().map(|s| ResultPresenter::new(s, state))
    }
}
