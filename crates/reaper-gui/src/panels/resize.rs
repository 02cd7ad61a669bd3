use reaper_core::consts::MAX_DIMENSION;

use crate::app::ReaperApp;
use crate::panels::helpers::{action_button, error_banner, metadata_grid, section_header, source_canvas};
use crate::panels::{result, CONTROLS_WIDTH};
use crate::state::Tab;

pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    if app.has_result(Tab::Resize) {
        result::show(ctx, app, Tab::Resize);
        return;
    }

    egui::SidePanel::left("controls")
        .default_width(CONTROLS_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(CONTROLS_WIDTH - 20.0);

                section_header(ui, "Source");
                if let Some(meta) = app.resize.presenter().map(|p| p.source_metadata()) {
                    metadata_grid(ui, "resize_source_meta", &meta);
                }

                ui.separator();
                section_header(ui, "Dimensions");
                let editable = app.resize.is_editable();
                let (mut width, mut height) = app.resize.dimensions();
                let mut changed = false;
                ui.add_enabled_ui(editable, |ui| {
                    egui::Grid::new("resize_dims").num_columns(2).show(ui, |ui| {
                        ui.label("Width");
                        changed |= ui
                            .add(egui::DragValue::new(&mut width).range(0..=MAX_DIMENSION).suffix(" px"))
                            .changed();
                        ui.end_row();
                        ui.label("Height");
                        changed |= ui
                            .add(egui::DragValue::new(&mut height).range(0..=MAX_DIMENSION).suffix(" px"))
                            .changed();
                        ui.end_row();
                    });
                    if ui.small_button("Use source size").clicked() {
                        if let Some(size) = app.resize.source().map(|s| s.size()) {
                            width = size.width;
                            height = size.height;
                            changed = true;
                        }
                    }
                });
                if changed {
                    app.resize.set_dimensions(width, height);
                }

                ui.add_space(8.0);
                if action_button(ui, "Resize", editable && width > 0 && height > 0) {
                    match app.resize.submit() {
                        Ok(Some(id)) => app.ui_state.add_log(format!("Resize submitted ({id})")),
                        Ok(None) => {}
                        Err(e) => app.report_error(e.to_string()),
                    }
                }

                let error = app
                    .resize
                    .presenter()
                    .and_then(|p| p.error())
                    .map(str::to_owned);
                if let Some(error) = error {
                    ui.add_space(4.0);
                    if error_banner(ui, &error) {
                        app.resize.dismiss_result();
                    }
                }

                ui.separator();
                if ui.button("Clear").clicked() {
                    app.clear_all();
                }
            });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(size) = app.resize.source().map(|s| s.size()) {
            source_canvas(ui, app.textures.source(), size, app.resize.is_pending());
        }
    });
}
