use tracing::info;

use crate::edit::{EditDispatcher, EditParams, EditStatus, RequestId};
use crate::error::{ReaperError, Result};
use crate::format::FileFormat;
use crate::source::SourceImage;

use super::result::ResultPresenter;

/// Format conversion editor.
pub struct ConvertView {
    source: Option<SourceImage>,
    target: FileFormat,
    default_target: FileFormat,
    dispatcher: EditDispatcher,
}

impl ConvertView {
    pub fn new(dispatcher: EditDispatcher, default_target: FileFormat) -> Self {
        Self {
            source: None,
            target: default_target,
            default_target,
            dispatcher,
        }
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn target(&self) -> FileFormat {
        self.target
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
        self.target = self.default_target;
        self.source = Some(source);
    }

    pub fn set_target(&mut self, target: FileFormat) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.target = target;
        true
    }

    pub fn submit(&mut self) -> Result<Option<RequestId>> {
        let source = self.source.as_ref().ok_or(ReaperError::NoSource)?;
        let params = EditParams::Convert {
            target: self.target,
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
        self.target = self.default_target;
        self.source = None;
        info!("convert view cleared");
    }

    pub fn presenter(&self) -> Option<ResultPresenter<'_>> {
        let state = self.dispatcher.state();
        self.source.as_ref().map(|s| ResultPresenter::new(s, state))
    }
}
