use crate::app::ReaperApp;
use crate::convert::fit_rect;
use crate::panels::helpers::{action_button, draw_image, metadata_grid, paint_background, section_header};
use crate::panels::CONTROLS_WIDTH;
use crate::state::Tab;

fn heading(tab: Tab) -> &'static str {
    match tab {
        Tab::Crop => "Cropped Image",
        Tab::Resize => "Resized Image",
        Tab::Convert => "Converted Image",
    }
}

/// Result mode for one tab: the artifact, its metadata and the download.
pub fn show(ctx: &egui::Context, app: &mut ReaperApp, tab: Tab) {
    let Some(presenter) = app.presenter(tab) else {
        return;
    };
    let Some(artifact) = presenter.artifact().cloned() else {
        return;
    };
    let source_meta = presenter.source_metadata();
    let result_meta = presenter.artifact_metadata();

    egui::SidePanel::left("controls")
        .default_width(CONTROLS_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(CONTROLS_WIDTH - 20.0);

                section_header(ui, heading(tab));
                if let Some(meta) = &result_meta {
                    metadata_grid(ui, "result_meta", meta);
                }
                ui.add_space(8.0);
                if action_button(ui, "Download", true) {
                    app.download(tab);
                }

                ui.separator();
                section_header(ui, "Original");
                metadata_grid(ui, "source_meta", &source_meta);

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Edit again").clicked() {
                        app.dismiss_result(tab);
                    }
                    if ui.button("Clear").clicked() {
                        app.clear_all();
                    }
                });
            });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);
        match app.textures.result(ctx, tab, &artifact) {
            Some(texture) => draw_image(ui, texture, fit_rect(rect.shrink(8.0), artifact.size())),
            None => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Preview unavailable",
                    egui::FontId::proportional(16.0),
                    egui::Color32::from_gray(140),
                );
            }
        }
    });
}
