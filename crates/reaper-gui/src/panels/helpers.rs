use reaper_core::geometry::ImageSize;
use reaper_core::metadata::ImageMetadata;

use crate::convert::fit_rect;

pub(crate) const ACCENT: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

/// Show a ComboBox for enum selection. Returns `true` if the value changed.
pub(crate) fn enum_combo<T: PartialEq + Copy + ToString>(
    ui: &mut egui::Ui,
    label: &str,
    current: &mut T,
    options: &[T],
) -> bool {
    let resp = egui::ComboBox::from_label(label)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            let mut changed = false;
            for &choice in options {
                if ui
                    .selectable_value(current, choice, choice.to_string())
                    .changed()
                {
                    changed = true;
                }
            }
            changed
        });
    resp.inner == Some(true)
}

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str) {
    egui::Frame::NONE.inner_margin(4.0).show(ui, |ui| {
        ui.strong(egui::RichText::new(label).color(ACCENT));
    });
}

/// Name / size / format / dimensions rows.
pub(crate) fn metadata_grid(ui: &mut egui::Ui, id: &str, meta: &ImageMetadata) {
    egui::Grid::new(id).num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
        for (label, value) in meta.rows() {
            ui.label(egui::RichText::new(label).weak());
            ui.label(value);
            ui.end_row();
        }
    });
}

pub(crate) fn draw_image(ui: &egui::Ui, texture: &egui::TextureHandle, rect: egui::Rect) {
    ui.painter().image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

pub(crate) fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Tinted veil with a spinner while a request is in flight.
pub(crate) fn pending_overlay(ui: &mut egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(239, 68, 68, 50));
    let spinner = egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0));
    ui.put(spinner, egui::Spinner::new().size(32.0));
}

/// Show the last backend error with a way to dismiss it. Returns `true`
/// when dismissed.
pub(crate) fn error_banner(ui: &mut egui::Ui, error: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(60, 20, 20))
        .inner_margin(6.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.colored_label(ACCENT, error);
            if ui.small_button("Dismiss").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

/// Primary action button, full width of the side panel.
pub(crate) fn action_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    ui.add_enabled(
        enabled,
        egui::Button::new(egui::RichText::new(label).strong())
            .min_size(egui::vec2(ui.available_width(), 28.0)),
    )
    .clicked()
}

/// Fill the central panel with the contain-fitted source preview.
pub(crate) fn source_canvas(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    size: ImageSize,
    pending: bool,
) {
    let rect = ui.available_rect_before_wrap();
    paint_background(ui, rect);
    if let Some(texture) = texture {
        draw_image(ui, texture, fit_rect(rect.shrink(8.0), size));
    }
    if pending {
        pending_overlay(ui, rect);
    }
}
