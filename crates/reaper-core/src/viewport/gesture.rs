use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::transform::{InteractionMode, ViewportTransform};
use crate::geometry::Point;

/// Something that can run a redraw on the next display frame.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl<F: Fn()> FrameScheduler for F {
    fn request_frame(&self) {
        self()
    }
}

/// Raw pointer input before it reaches the gesture protocol.
#[derive(Clone, Copy, Debug)]
pub enum PointerInput<'a> {
    Mouse(Point),
    /// Active touch points; the first one drives the gesture.
    Touch(&'a [Point]),
}

impl PointerInput<'_> {
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Mouse(p) => Some(*p),
            Self::Touch(points) => points.first().copied(),
        }
    }
}

/// Registry of window-level pointer-release listeners.
///
/// A listener exists exactly as long as its [`ReleaseSubscription`] is alive.
#[derive(Clone, Debug, Default)]
pub struct ReleaseListeners {
    active: Rc<Cell<usize>>,
}

impl ReleaseListeners {
    pub fn subscribe(&self) -> ReleaseSubscription {
        self.active.set(self.active.get() + 1);
        ReleaseSubscription {
            active: Rc::clone(&self.active),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.active.get() > 0
    }

    pub fn active(&self) -> usize {
        self.active.get()
    }
}

/// Scoped window-level release listener; unsubscribes on drop.
#[derive(Debug)]
pub struct ReleaseSubscription {
    active: Rc<Cell<usize>>,
}

impl Drop for ReleaseSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

#[derive(Debug)]
struct GestureSession {
    anchor_pan: Point,
    anchor_pointer: Point,
    _release: ReleaseSubscription,
}

/// Single-slot redraw queue: at most one frame is ever outstanding, and it
/// commits whatever pan was staged last.
#[derive(Debug, Default)]
struct RedrawSlot {
    scheduled: bool,
    scratch: Option<Point>,
}

impl RedrawSlot {
    /// Stage a pan. Returns true when a new frame has to be requested.
    fn stage(&mut self, pan: Point) -> bool {
        self.scratch = Some(pan);
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    fn take(&mut self) -> Option<Point> {
        self.scheduled = false;
        self.scratch.take()
    }
}

/// Pan-gesture state machine for the zoomed crop preview.
#[derive(Debug, Default)]
pub struct GestureController {
    session: Option<GestureSession>,
    slot: RedrawSlot,
    listeners: ReleaseListeners,
    commits: u64,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn frame_scheduled(&self) -> bool {
        self.slot.scheduled
    }

    /// Number of pans written to the viewport so far.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Handle to the release listeners this controller subscribes to.
    pub fn listeners(&self) -> ReleaseListeners {
        self.listeners.clone()
    }

    /// Pointer/touch down. Only opens a session in pan mode while zoomed in.
    pub fn start(
        &mut self,
        pointer: Point,
        mode: InteractionMode,
        viewport: &ViewportTransform,
    ) -> bool {
        if mode != InteractionMode::Pan || !viewport.is_zoomed() {
            return false;
        }
        // A second press without a release replaces the old session.
        self.session = None;
        self.slot = RedrawSlot::default();
        self.session = Some(GestureSession {
            anchor_pan: viewport.pan(),
            anchor_pointer: pointer,
            _release: self.listeners.subscribe(),
        });
        debug!(x = pointer.x, y = pointer.y, "pan gesture started");
        true
    }

    /// Pointer/touch move. Stages the candidate pan and requests a frame if
    /// none is pending.
    pub fn move_to(&mut self, pointer: Point, scheduler: &impl FrameScheduler) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let candidate = session.anchor_pan + (pointer - session.anchor_pointer);
        if self.slot.stage(candidate) {
            scheduler.request_frame();
        }
        true
    }

    /// Display frame fired: commit the staged pan, if any. Returns true only
    /// when the viewport accepted it.
    pub fn on_frame(&mut self, viewport: &mut ViewportTransform) -> bool {
        let Some(pan) = self.slot.take() else {
            return false;
        };
        if !viewport.set_pan(pan) {
            return false;
        }
        self.commits += 1;
        true
    }

    /// Pointer/touch up on the element. Commits the last staged pan
    /// immediately and closes the session.
    pub fn end(&mut self, viewport: &mut ViewportTransform) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        self.on_frame(viewport);
        debug!(x = viewport.pan().x, y = viewport.pan().y, "pan gesture ended");
        true
    }

    /// Window-level release. Only acts while a release listener is subscribed.
    pub fn on_global_release(&mut self, viewport: &mut ViewportTransform) -> bool {
        if !self.listeners.is_listening() {
            return false;
        }
        self.end(viewport)
    }

    /// Drop the session and any staged pan without committing. Used when the
    /// viewport itself is being reset.
    pub fn reset(&mut self) {
        self.session = None;
        self.slot = RedrawSlot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn zoomed(steps: usize) -> ViewportTransform {
        let mut v = ViewportTransform::default();
        for _ in 0..steps {
            v.zoom_in();
        }
        v
    }

    #[test]
    fn test_start_requires_pan_mode_and_zoom() {
        let mut g = GestureController::new();
        let flat = ViewportTransform::default();
        assert!(!g.start(Point::ZERO, InteractionMode::Pan, &flat));
        assert!(!g.is_active());
        assert_eq!(g.listeners().active(), 0);

        let v = zoomed(5);
        assert!(!g.start(Point::ZERO, InteractionMode::Crop, &v));
        assert!(g.start(Point::ZERO, InteractionMode::Pan, &v));
        assert!(g.is_active());
        assert_eq!(g.listeners().active(), 1);
    }

    #[test]
    fn test_move_before_start_is_noop() {
        let mut g = GestureController::new();
        let frames = Cell::new(0);
        assert!(!g.move_to(Point::new(5.0, 5.0), &|| frames.set(frames.get() + 1)));
        assert_eq!(frames.get(), 0);
        assert!(!g.frame_scheduled());
    }

    #[test]
    fn test_moves_coalesce_into_one_commit_per_frame() {
        let mut g = GestureController::new();
        let mut v = zoomed(10);
        v.set_pan(Point::new(10.0, 20.0));
        let frames = Cell::new(0);
        let schedule = || frames.set(frames.get() + 1);

        g.start(Point::new(100.0, 100.0), InteractionMode::Pan, &v);
        for i in 1..=25 {
            g.move_to(Point::new(100.0 + i as f64, 100.0 - i as f64), &schedule);
        }
        assert_eq!(frames.get(), 1);
        assert_eq!(v.pan(), Point::new(10.0, 20.0), "no commit before the frame");

        assert!(g.on_frame(&mut v));
        assert_eq!(g.commit_count(), 1);
        assert_eq!(v.pan(), Point::new(35.0, -5.0));

        // Nothing staged: the next frame commits nothing.
        assert!(!g.on_frame(&mut v));
        assert_eq!(g.commit_count(), 1);

        g.move_to(Point::new(90.0, 90.0), &schedule);
        assert_eq!(frames.get(), 2);
        g.on_frame(&mut v);
        assert_eq!(v.pan(), Point::new(0.0, 10.0));
    }

    #[test]
    fn test_rejected_pan_is_not_counted() {
        let mut g = GestureController::new();
        let mut v = zoomed(2);
        g.start(Point::ZERO, InteractionMode::Pan, &v);
        g.move_to(Point::new(6.0, 6.0), &|| {});
        // Zoomed back out before the frame fired.
        v.reset();
        assert!(!g.on_frame(&mut v));
        assert_eq!(g.commit_count(), 0);
        assert_eq!(v.pan(), Point::ZERO);
    }

    #[test]
    fn test_end_commits_synchronously() {
        let mut g = GestureController::new();
        let mut v = zoomed(10);
        g.start(Point::ZERO, InteractionMode::Pan, &v);
        g.move_to(Point::new(7.0, 3.0), &|| {});
        assert!(g.end(&mut v));
        assert_eq!(v.pan(), Point::new(7.0, 3.0));
        assert!(!g.is_active());
        assert!(!g.frame_scheduled());
        assert_eq!(g.listeners().active(), 0);
        // Late frame after end has nothing to apply.
        assert!(!g.on_frame(&mut v));
    }

    #[test]
    fn test_global_release_ends_session_only_while_subscribed() {
        let mut g = GestureController::new();
        let mut v = zoomed(3);
        assert!(!g.on_global_release(&mut v));

        g.start(Point::ZERO, InteractionMode::Pan, &v);
        g.move_to(Point::new(-4.0, 2.0), &|| {});
        assert!(g.on_global_release(&mut v));
        assert!(!g.is_active());
        assert_eq!(v.pan(), Point::new(-4.0, 2.0));
        assert!(!g.listeners().is_listening());
    }

    #[test]
    fn test_dropping_controller_releases_listener() {
        let v = zoomed(2);
        let mut g = GestureController::new();
        let listeners = g.listeners();
        g.start(Point::ZERO, InteractionMode::Pan, &v);
        assert_eq!(listeners.active(), 1);
        drop(g);
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_restart_does_not_leak_listeners() {
        let v = zoomed(2);
        let mut g = GestureController::new();
        g.start(Point::ZERO, InteractionMode::Pan, &v);
        g.start(Point::new(1.0, 1.0), InteractionMode::Pan, &v);
        assert_eq!(g.listeners().active(), 1);
    }

    #[test]
    fn test_touch_uses_first_point() {
        let touches = [Point::new(3.0, 4.0), Point::new(9.0, 9.0)];
        assert_eq!(PointerInput::Touch(&touches).position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(PointerInput::Touch(&[]).position(), None);
        assert_eq!(
            PointerInput::Mouse(Point::new(1.0, 2.0)).position(),
            Some(Point::new(1.0, 2.0))
        );
    }
}
