mod app;
mod convert;
mod messages;
mod panels;
mod state;

use reaper_core::config::EditorConfig;

/// Environment variable naming an editor config file.
const CONFIG_ENV: &str = "REAPER_CONFIG";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("Reaper"),
        ..Default::default()
    };

    eframe::run_native(
        "Reaper",
        options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > {
                let app = app::ReaperApp::new(&cc.egui_ctx, config)?;
                Ok(Box::new(app))
            },
        ),
    )
}

fn load_config() -> EditorConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return EditorConfig::default();
    };
    match EditorConfig::load(std::path::Path::new(&path)) {
        Ok(config) => {
            tracing::info!(path = ?path, "loaded editor config");
            config
        }
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "ignoring unreadable config, using defaults");
            EditorConfig::default()
        }
    }
}
