use crate::app::ReaperApp;
use crate::state::Tab;

pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if app.ui_state.loading {
                ui.spinner();
                ui.label("Loading...");
                ui.separator();
            }
            if let Some(source) = app.crop.source() {
                ui.label(source.size().to_string());
                ui.separator();
                ui.label(source.format().to_string());
                ui.separator();
            }
            if app.ui_state.tab == Tab::Crop && app.has_source() {
                ui.label(format!("Zoom: {:.0}%", app.crop.viewport().zoom() * 100.0));
                ui.separator();
                ui.label(format!("Mode: {}", app.crop.mode()));
            }
        });

        ui.add_space(2.0);
    });
}
