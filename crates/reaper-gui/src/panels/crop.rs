use std::time::Instant;

use reaper_core::geometry::{CropRect, CropRegion, Point};
use reaper_core::viewport::{map_to_source, InteractionMode, PointerInput};

use crate::app::ReaperApp;
use crate::convert::{fit_rect, region_rect, to_point, to_size, to_vec2};
use crate::panels::helpers::{
    action_button, error_banner, metadata_grid, paint_background, pending_overlay, section_header,
};
use crate::panels::{result, CONTROLS_WIDTH};
use crate::state::Tab;

pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    if app.has_result(Tab::Crop) {
        result::show(ctx, app, Tab::Crop);
        return;
    }
    controls(ctx, app);
    viewport(ctx, app);
}

/// Source pixels the committed selection maps to, if any.
fn mapped_selection(app: &ReaperApp) -> Option<CropRect> {
    let source = app.crop.source()?;
    let region = app.crop.selection().committed().filter(|r| !r.is_empty())?;
    map_to_source(&region, app.crop.viewport(), source.size(), app.crop.rendered_size()).ok()
}

fn controls(ctx: &egui::Context, app: &mut ReaperApp) {
    egui::SidePanel::left("controls")
        .default_width(CONTROLS_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(CONTROLS_WIDTH - 20.0);

                section_header(ui, "Source");
                if let Some(meta) = app.crop.presenter().map(|p| p.source_metadata()) {
                    metadata_grid(ui, "crop_source_meta", &meta);
                }

                ui.separator();
                section_header(ui, "View");
                let editable = app.crop.is_editable();
                ui.horizontal(|ui| {
                    let view = *app.crop.viewport();
                    if ui
                        .add_enabled(editable && view.can_zoom_out(), egui::Button::new("-"))
                        .clicked()
                    {
                        app.crop.zoom_out();
                    }
                    ui.label(format!("{:.0}%", view.zoom() * 100.0));
                    if ui
                        .add_enabled(editable && view.can_zoom_in(), egui::Button::new("+"))
                        .clicked()
                    {
                        app.crop.zoom_in();
                    }
                });
                ui.add_enabled_ui(editable, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Drag to:");
                        for mode in [InteractionMode::Crop, InteractionMode::Pan] {
                            if ui
                                .selectable_label(app.crop.mode() == mode, mode.to_string())
                                .clicked()
                            {
                                app.crop.set_mode(mode);
                                app.ui_state.crop_anchor = None;
                            }
                        }
                    });
                });

                ui.separator();
                section_header(ui, "Selection");
                let mapped = mapped_selection(app);
                match mapped {
                    Some(rect) => ui.label(rect.to_string()),
                    None => ui.label(egui::RichText::new("Drag over the image to select").weak()),
                };

                ui.add_space(8.0);
                if action_button(ui, "Crop", editable && mapped.is_some()) {
                    match app.crop.submit() {
                        Ok(Some(id)) => app.ui_state.add_log(format!("Crop submitted ({id})")),
                        Ok(None) => {}
                        Err(e) => app.report_error(e.to_string()),
                    }
                }

                let error = app
                    .crop
                    .presenter()
                    .and_then(|p| p.error())
                    .map(str::to_owned);
                if let Some(error) = error {
                    ui.add_space(4.0);
                    if error_banner(ui, &error) {
                        app.crop.dismiss_result();
                    }
                }

                ui.separator();
                if ui.button("Clear").clicked() {
                    app.clear_all();
                }
            });
        });
}

fn viewport(ctx: &egui::Context, app: &mut ReaperApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let Some(size) = app.crop.source().map(|s| s.size()) else {
            return;
        };
        let base = fit_rect(rect.shrink(8.0), size);
        app.crop.set_rendered_size(to_size(base.size()));

        handle_zoom(ui, &response, app);
        match app.crop.mode() {
            InteractionMode::Pan => handle_pan(ctx, &response, app),
            InteractionMode::Crop => handle_selection(&response, app, base),
        }
        if ctx.input(|i| i.pointer.any_released()) {
            app.crop.global_release();
        }
        app.crop.on_frame();

        let now = Instant::now();
        app.crop.tick(now);
        if let Some(deadline) = app.crop.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        let view = *app.crop.viewport();
        let image_rect = egui::Rect::from_center_size(
            base.center() + to_vec2(view.pan()),
            base.size() * view.zoom() as f32,
        );
        if let Some(texture) = app.textures.source() {
            ui.painter_at(rect).image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if let Some(region) = app.crop.selection().pending().filter(|r| !r.is_empty()) {
            let label = map_to_source(&region, &view, size, app.crop.rendered_size()).ok();
            draw_selection(ui, base, region_rect(&region, base), label);
        }

        if app.crop.is_pending() {
            pending_overlay(ui, rect);
        }
    });
}

/// One zoom step per wheel event while hovering the viewport.
fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut ReaperApp) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    if scroll_delta > 0.0 {
        app.crop.zoom_in();
    } else {
        app.crop.zoom_out();
    }
}

fn handle_pan(ctx: &egui::Context, response: &egui::Response, app: &mut ReaperApp) {
    if app.crop.viewport().is_zoomed() {
        let icon = if app.crop.is_panning() {
            egui::CursorIcon::Grabbing
        } else {
            egui::CursorIcon::Grab
        };
        if response.hovered() || app.crop.is_panning() {
            ctx.set_cursor_icon(icon);
        }
    }

    if response.drag_stopped() {
        app.crop.pointer_up();
        return;
    }
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    let point = Point::new(pos.x as f64, pos.y as f64);
    let touches = [point];
    let input = if ctx.input(|i| i.any_touches()) {
        PointerInput::Touch(&touches)
    } else {
        PointerInput::Mouse(point)
    };

    if response.drag_started() {
        app.crop.pointer_down(input);
    } else if response.dragged() {
        app.crop.pointer_move(input, &|| ctx.request_repaint());
    }
}

/// Drag a rectangle over the unscaled image rect `base`.
fn handle_selection(response: &egui::Response, app: &mut ReaperApp, base: egui::Rect) {
    let to_local = |pos: egui::Pos2| to_point(pos - base.min);

    if response.drag_started() {
        app.ui_state.crop_anchor = response.interact_pointer_pos().map(to_local);
    }
    if response.dragged() || response.drag_stopped() {
        if let (Some(anchor), Some(pos)) = (app.ui_state.crop_anchor, response.interact_pointer_pos()) {
            let region = CropRegion::from_corners(anchor, to_local(pos))
                .clamped_to(to_size(base.size()));
            app.crop.update_selection(region, Instant::now());
        }
    }
    if response.drag_stopped() {
        app.ui_state.crop_anchor = None;
    }
}

fn draw_selection(ui: &egui::Ui, base: egui::Rect, selection: egui::Rect, source: Option<CropRect>) {
    let dim_color = egui::Color32::from_black_alpha(140);
    let border_color = egui::Color32::from_rgb(255, 255, 0);
    let painter = ui.painter();

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(base.left_top(), egui::pos2(base.right(), selection.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(base.left(), selection.bottom()), base.right_bottom()),
        0.0,
        dim_color,
    );
    // Left
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(base.left(), selection.top()),
            egui::pos2(selection.left(), selection.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(selection.right(), selection.top()),
            egui::pos2(base.right(), selection.bottom()),
        ),
        0.0,
        dim_color,
    );

    painter.rect_stroke(
        selection,
        0.0,
        egui::Stroke::new(1.5, border_color),
        egui::epaint::StrokeKind::Outside,
    );

    if let Some(rect) = source {
        painter.text(
            egui::pos2(selection.right() - 4.0, selection.bottom() + 4.0),
            egui::Align2::RIGHT_TOP,
            format!("{}x{}", rect.width, rect.height),
            egui::FontId::proportional(12.0),
            border_color,
        );
    }
}
