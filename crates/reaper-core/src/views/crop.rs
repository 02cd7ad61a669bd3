use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::edit::{EditDispatcher, EditParams, EditStatus, RequestId};
use crate::error::{ReaperError, Result};
use crate::geometry::{CropRegion, Size};
use crate::source::SourceImage;
use crate::viewport::{
    map_to_source, CropSelection, FrameScheduler, GestureController, InteractionMode,
    PointerInput, ReleaseListeners, ViewportTransform,
};

use super::result::ResultPresenter;

/// Interactive crop editor: zoomable preview, pan gestures, a debounced
/// selection, and a single-in-flight crop request.
pub struct CropView {
    source: Option<SourceImage>,
    viewport: ViewportTransform,
    mode: InteractionMode,
    gesture: GestureController,
    selection: CropSelection,
    debounce: Duration,
    /// Unscaled contain-fit size of the image on screen.
    rendered: Size,
    dispatcher: EditDispatcher,
}

impl CropView {
    pub fn new(dispatcher: EditDispatcher, debounce: Duration) -> Self {
        Self {
            source: None,
            viewport: ViewportTransform::default(),
            mode: InteractionMode::default(),
            gesture: GestureController::new(),
            selection: CropSelection::new(debounce),
            debounce,
            rendered: Size::default(),
            dispatcher,
        }
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selection(&self) -> &CropSelection {
        &self.selection
    }

    pub fn status(&self) -> &EditStatus {
        self.dispatcher.status()
    }

    pub fn is_pending(&self) -> bool {
        self.dispatcher.is_pending()
    }

    pub fn release_listeners(&self) -> ReleaseListeners {
        self.gesture.listeners()
    }

    pub fn is_panning(&self) -> bool {
        self.gesture.is_active()
    }

    /// Controls are live only while nothing is in flight and no result is
    /// being presented.
    pub fn is_editable(&self) -> bool {
        self.source.is_some() && self.dispatcher.state().accepts_submit()
    }

    /// Replace the source image, starting from a clean slate.
    pub fn set_source(&mut self, source: SourceImage) {
        self.reset_interaction();
        self.dispatcher.clear();
        self.source = Some(source);
    }

    /// Drop the source, any result and all interaction state.
    pub fn clear(&mut self) {
        self.reset_interaction();
        self.dispatcher.clear();
        self.source = None;
        info!("crop view cleared");
    }

    fn reset_interaction(&mut self) {
        self.gesture.reset();
        self.viewport.reset();
        self.selection = CropSelection::new(self.debounce);
        self.mode = InteractionMode::default();
        self.rendered = Size::default();
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode == self.mode {
            return;
        }
        if mode == InteractionMode::Crop && self.gesture.is_active() {
            self.gesture.end(&mut self.viewport);
        }
        debug!(%mode, "interaction mode changed");
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn zoom_in(&mut self) {
        if self.is_editable() {
            self.viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.is_editable() {
            self.viewport.zoom_out();
            if !self.viewport.is_zoomed() {
                self.gesture.reset();
            }
        }
    }

    /// Record the size the image was laid out at, before zoom.
    pub fn set_rendered_size(&mut self, rendered: Size) {
        self.rendered = rendered;
    }

    pub fn rendered_size(&self) -> Size {
        self.rendered
    }

    pub fn pointer_down(&mut self, input: PointerInput<'_>) -> bool {
        if !self.is_editable() {
            return false;
        }
        match input.position() {
            Some(p) => self.gesture.start(p, self.mode, &self.viewport),
            None => false,
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput<'_>, scheduler: &impl FrameScheduler) -> bool {
        match input.position() {
            Some(p) => self.gesture.move_to(p, scheduler),
            None => false,
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        self.gesture.end(&mut self.viewport)
    }

    /// Release seen anywhere in the window.
    pub fn global_release(&mut self) -> bool {
        self.gesture.on_global_release(&mut self.viewport)
    }

    /// Display frame: apply the staged pan.
    pub fn on_frame(&mut self) -> bool {
        self.gesture.on_frame(&mut self.viewport)
    }

    /// Live selection update from the overlay. Ignored in pan mode and while
    /// the view is not editable.
    pub fn update_selection(&mut self, region: CropRegion, now: Instant) -> bool {
        if self.mode == InteractionMode::Pan || !self.is_editable() {
            return false;
        }
        self.selection.update(region, now);
        true
    }

    /// Advance the selection debounce.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.selection.poll(now).is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.selection.deadline()
    }

    /// Map the committed selection and dispatch a crop.
    ///
    /// Invalid selections are rejected here and never reach the backend.
    /// `Ok(None)` means the dispatcher refused because the view is busy.
    pub fn submit(&mut self) -> Result<Option<RequestId>> {
        let source = self.source.as_ref().ok_or(ReaperError::NoSource)?;
        if !self.dispatcher.state().accepts_submit() {
            return Ok(None);
        }
        let region = self
            .selection
            .committed()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ReaperError::InvalidSelection("nothing selected".into()))?;
        let rect = map_to_source(&region, &self.viewport, source.size(), self.rendered)?;
        let image = source.image().clone();
        Ok(self.dispatcher.submit(image, EditParams::Crop(rect)))
    }

    pub fn poll(&mut self) -> bool {
        self.dispatcher.poll()
    }

    /// Leave result mode (or dismiss an error) without dropping the source.
    pub fn dismiss_result(&mut self) {
        self.dispatcher.clear();
    }

    pub fn presenter(&self) -> Option<ResultPresenter<'_>> {
        let state = self.dispatcher.state();
        self.source.as_ref().map(|s| ResultPresenter::new(s, state))
    }
}
