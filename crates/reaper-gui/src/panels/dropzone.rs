use crate::app::ReaperApp;
use crate::panels::helpers::{paint_background, ACCENT};

/// Empty state: accepts dropped files or opens the picker on click.
pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);
        let response = ui.allocate_rect(rect, egui::Sense::click());

        let zone = rect.shrink(32.0);
        let stroke = if hovering || response.hovered() {
            egui::Stroke::new(2.0, ACCENT)
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(90))
        };
        ui.painter()
            .rect_stroke(zone, 8.0, stroke, egui::epaint::StrokeKind::Inside);

        let text = if app.ui_state.loading {
            "Loading..."
        } else if hovering {
            "Release to open"
        } else {
            "Drop an image here or click to browse"
        };
        ui.painter().text(
            zone.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(18.0),
            egui::Color32::from_gray(140),
        );

        if response.clicked() && !app.ui_state.loading {
            app.open_dialog();
        }
    });
}

/// Files dropped on the window replace the source from any tab.
pub fn take_dropped_file(ctx: &egui::Context, app: &mut ReaperApp) {
    let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
    let Some(file) = dropped else {
        return;
    };
    if let Some(path) = file.path {
        app.open_path(path);
    } else if let Some(bytes) = file.bytes {
        let name = (!file.name.is_empty()).then_some(file.name);
        app.open_bytes(bytes.to_vec(), name);
    }
}
