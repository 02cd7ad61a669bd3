use reaper_core::error::Result;
use reaper_core::geometry::{CropRegion, ImageSize, Point, Size};
use reaper_core::source::EncodedImage;

/// Decode an encoded image into an egui ColorImage.
pub fn to_color_image(image: &EncodedImage) -> Result<egui::ColorImage> {
    let rgba = image.decode()?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

pub fn to_point(v: egui::Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

pub fn to_vec2(p: Point) -> egui::Vec2 {
    egui::vec2(p.x as f32, p.y as f32)
}

pub fn to_size(v: egui::Vec2) -> Size {
    Size::new(v.x as f64, v.y as f64)
}

/// Screen rect of the image when contain-fitted and centred in `container`.
pub fn fit_rect(container: egui::Rect, image: ImageSize) -> egui::Rect {
    let fitted = image.contain_in(to_size(container.size()));
    egui::Rect::from_center_size(
        container.center(),
        egui::vec2(fitted.width as f32, fitted.height as f32),
    )
}

/// Screen rect of a selection drawn against `base`, the unscaled image rect.
pub fn region_rect(region: &CropRegion, base: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        base.min + egui::vec2(region.x as f32, region.y as f32),
        egui::vec2(region.width as f32, region.height as f32),
    )
}
