use std::time::Duration;

/// Lowest zoom factor of the crop preview (the unscaled, contain-fit image).
pub const MIN_ZOOM: f64 = 1.0;

/// Highest zoom factor of the crop preview.
pub const MAX_ZOOM: f64 = 3.0;

/// Increment applied by a single zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom values are rounded to this many decimal places after each step.
pub const ZOOM_DECIMALS: i32 = 2;

/// Quiet period after the last crop-rectangle update before it is committed.
pub const CROP_DEBOUNCE: Duration = Duration::from_millis(100);

/// How long a completion notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Largest width or height a resize may target.
pub const MAX_DIMENSION: u32 = 16_384;

/// Stem used for download names when the source has no file name
/// (crop and resize results).
pub const DEFAULT_STEM: &str = "image";

/// Stem used for converted downloads when the source has no file name.
pub const DEFAULT_CONVERT_STEM: &str = "converted-image";

/// Base of the human-readable file size units (KB, MB, GB).
pub const SIZE_UNIT: u64 = 1024;
