use std::time::Instant;

use crate::app::ReaperApp;
use crate::panels::helpers::ACCENT;

/// Toast in the bottom-right corner until the notice expires.
pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    let now = Instant::now();
    let Some(notice) = app.ui_state.active_notice(now) else {
        return;
    };
    let message = notice.message.clone();
    ctx.request_repaint_after(notice.expires.saturating_duration_since(now));

    egui::Area::new(egui::Id::new("notice"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -120.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .stroke(egui::Stroke::new(1.0, ACCENT))
                .show(ui, |ui| {
                    ui.label(message);
                });
        });
}
