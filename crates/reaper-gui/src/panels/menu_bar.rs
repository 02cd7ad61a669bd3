use crate::app::ReaperApp;

pub fn show(ctx: &egui::Context, app: &mut ReaperApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    app.open_dialog();
                }

                let tab = app.ui_state.tab;
                if ui
                    .add_enabled(
                        app.has_result(tab),
                        egui::Button::new("Download Result...")
                            .shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.download(tab);
                }

                if ui.add_enabled(app.has_source(), egui::Button::new("Clear")).clicked() {
                    ui.close();
                    app.clear_all();
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            app.open_dialog();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) {
            let tab = app.ui_state.tab;
            if app.has_result(tab) {
                app.download(tab);
            }
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}
