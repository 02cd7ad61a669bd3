use tracing::debug;

use super::transform::ViewportTransform;
use crate::error::{ReaperError, Result};
use crate::geometry::{CropRect, CropRegion, ImageSize, Size};

/// Display pixels per source pixel when `intrinsic` is contain-fitted into
/// `rendered`.
pub fn contain_scale(intrinsic: ImageSize, rendered: Size) -> f64 {
    if intrinsic.width == 0 || intrinsic.height == 0 {
        return 0.0;
    }
    (rendered.width / intrinsic.width as f64).min(rendered.height / intrinsic.height as f64)
}

/// Map a committed selection into integer pixel coordinates on the source.
///
/// `region` is relative to the top-left of the unscaled rendered image of
/// size `rendered`. The preview transform only changes what the user sees
/// while aiming and never moves the result.
pub fn map_to_source(
    region: &CropRegion,
    preview: &ViewportTransform,
    intrinsic: ImageSize,
    rendered: Size,
) -> Result<CropRect> {
    let scale = contain_scale(intrinsic, rendered);
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ReaperError::InvalidSelection(format!(
            "cannot map onto a {intrinsic} image rendered at {}x{}",
            rendered.width, rendered.height
        )));
    }

    let to_source = |v: f64| (v / scale).round();
    let x = to_source(region.x);
    let y = to_source(region.y);
    let width = to_source(region.width);
    let height = to_source(region.height);
    if ![x, y, width, height].iter().all(|v| v.is_finite()) {
        return Err(ReaperError::InvalidSelection("non-finite coordinates".into()));
    }

    let left = x.clamp(0.0, intrinsic.width as f64);
    let top = y.clamp(0.0, intrinsic.height as f64);
    let right = (x + width).clamp(0.0, intrinsic.width as f64);
    let bottom = (y + height).clamp(0.0, intrinsic.height as f64);

    if right <= left || bottom <= top {
        return Err(ReaperError::InvalidSelection(format!(
            "selection ({:.1},{:.1} {:.1}x{:.1}) has no area inside the {intrinsic} image",
            region.x, region.y, region.width, region.height
        )));
    }

    let rect = CropRect::new(
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    );
    debug!(
        %rect,
        scale,
        preview_zoom = preview.zoom(),
        "mapped selection to source pixels"
    );
    Ok(rect)
}
