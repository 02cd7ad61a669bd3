use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset in display pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A size in display pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Intrinsic pixel dimensions of an encoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest size with this aspect ratio that fits inside `container`.
    pub fn contain_in(&self, container: Size) -> Size {
        if self.width == 0 || self.height == 0 || container.is_empty() {
            return Size::default();
        }
        let scale = (container.width / self.width as f64).min(container.height / self.height as f64);
        Size::new(self.width as f64 * scale, self.height as f64 * scale)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// Crop selection in the coordinate space of the rendered (unscaled) image.
///
/// Width and height are never negative; a zero-area region means
/// "no selection".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Region spanned by two arbitrary corners (drag start and current position).
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
        )
    }

    /// Clip the region to `[0, bounds.width] × [0, bounds.height]`.
    pub fn clamped_to(&self, bounds: Size) -> Self {
        let left = self.x.clamp(0.0, bounds.width);
        let top = self.y.clamp(0.0, bounds.height);
        let right = (self.x + self.width).clamp(0.0, bounds.width);
        let bottom = (self.y + self.height).clamp(0.0, bounds.height);
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A rectangle in source image pixel coordinates, as sent to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the rectangle has area and lies entirely inside `size`.
    pub fn fits_within(&self, size: ImageSize) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= size.width as u64
            && self.y as u64 + self.height as u64 <= size.height as u64
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_drag_direction() {
        let r = CropRegion::from_corners(Point::new(50.0, 40.0), Point::new(10.0, 20.0));
        assert_eq!(r, CropRegion::new(10.0, 20.0, 40.0, 20.0));
    }

    #[test]
    fn test_new_never_negative() {
        let r = CropRegion::new(0.0, 0.0, -5.0, -1.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn test_clamped_to_bounds() {
        let r = CropRegion::new(-10.0, 5.0, 50.0, 200.0).clamped_to(Size::new(30.0, 100.0));
        assert_eq!(r, CropRegion::new(0.0, 5.0, 30.0, 95.0));
    }

    #[test]
    fn test_contain_in_preserves_aspect() {
        let fit = ImageSize::new(800, 600).contain_in(Size::new(400.0, 400.0));
        assert_eq!(fit, Size::new(400.0, 300.0));
    }

    #[test]
    fn test_crop_rect_fits_within() {
        let size = ImageSize::new(100, 50);
        assert!(CropRect::new(0, 0, 100, 50).fits_within(size));
        assert!(!CropRect::new(1, 0, 100, 50).fits_within(size));
        assert!(!CropRect::new(0, 0, 0, 50).fits_within(size));
    }
}
