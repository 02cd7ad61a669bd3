use std::fmt;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_DECIMALS, ZOOM_STEP};
use crate::geometry::Point;

/// What primary-button drags on the crop viewport do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Drags edit the crop rectangle.
    #[default]
    Crop,
    /// Drags pan the zoomed preview.
    Pan,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Crop => Self::Pan,
            Self::Pan => Self::Crop,
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crop => write!(f, "Crop"),
            Self::Pan => write!(f, "Pan"),
        }
    }
}

/// Preview zoom and pan of the crop viewport.
///
/// Invariant: at the minimum zoom the pan is always zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    zoom: f64,
    pan: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan: Point::ZERO,
        }
    }
}

impl ViewportTransform {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    pub fn zoom_in(&mut self) {
        self.step_zoom(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.step_zoom(-ZOOM_STEP);
    }

    fn step_zoom(&mut self, delta: f64) {
        let factor = 10f64.powi(ZOOM_DECIMALS);
        let next = ((self.zoom + delta) * factor).round() / factor;
        self.zoom = next.clamp(MIN_ZOOM, MAX_ZOOM);
        if !self.is_zoomed() {
            self.pan = Point::ZERO;
        }
    }

    /// Move the preview. Ignored unless zoomed in. Returns whether the pan
    /// was accepted.
    pub fn set_pan(&mut self, pan: Point) -> bool {
        if !self.is_zoomed() {
            return false;
        }
        self.pan = pan;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
