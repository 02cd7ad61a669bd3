use reaper_core::format::FileFormat;

use crate::app::ReaperApp;
use crate::panels::helpers::{
    action_button, enum_combo, error_banner, metadata_grid, section_header, source_canvas,
};
use crate::panels::{result, CONTROLS_WIDTH};
use crate::state::Tab;

pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    if app.has_result(Tab::Convert) {
        result::show(ctx, app, Tab::Convert);
        return;
    }

    egui::SidePanel::left("controls")
        .default_width(CONTROLS_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(CONTROLS_WIDTH - 20.0);

                section_header(ui, "Source");
                if let Some(meta) = app.convert.presenter().map(|p| p.source_metadata()) {
                    metadata_grid(ui, "convert_source_meta", &meta);
                }

                ui.separator();
                section_header(ui, "Target Format");
                let editable = app.convert.is_editable();
                let mut target = app.convert.target();
                ui.add_enabled_ui(editable, |ui| {
                    if enum_combo(ui, "Format", &mut target, FileFormat::ALL) {
                        app.convert.set_target(target);
                    }
                });

                ui.add_space(8.0);
                if action_button(ui, "Convert", editable) {
                    match app.convert.submit() {
                        Ok(Some(id)) => app.ui_state.add_log(format!("Convert submitted ({id})")),
                        Ok(None) => {}
                        Err(e) => app.report_error(e.to_string()),
                    }
                }

                let error = app
                    .convert
                    .presenter()
                    .and_then(|p| p.error())
                    .map(str::to_owned);
                if let Some(error) = error {
                    ui.add_space(4.0);
                    if error_banner(ui, &error) {
                        app.convert.dismiss_result();
                    }
                }

                ui.separator();
                if ui.button("Clear").clicked() {
                    app.clear_all();
                }
            });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(size) = app.convert.source().map(|s| s.size()) {
            source_canvas(ui, app.textures.source(), size, app.convert.is_pending());
        }
    });
}
