use crate::app::ReaperApp;
use crate::state::Tab;

pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for &tab in Tab::ALL {
                ui.selectable_value(&mut app.ui_state.tab, tab, tab.to_string());
            }
        });
    });
}
