use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use reaper_core::config::EditorConfig;
use reaper_core::edit::{EditDispatcher, EditStatus, LocalBackend};
use reaper_core::format::FileFormat;
use reaper_core::persist::{download_notice, save, SaveOutcome, SaveTarget};
use reaper_core::source::{load_path, SourceImage};
use reaper_core::views::{ConvertView, CropView, ResizeView, ResultPresenter};
use tracing::{debug, info, warn};

use crate::convert::to_color_image;
use crate::messages::AppEvent;
use crate::panels;
use crate::state::{Tab, TextureCache, UIState};

pub struct ReaperApp {
    pub event_tx: mpsc::Sender<AppEvent>,
    pub event_rx: mpsc::Receiver<AppEvent>,
    pub ctx: egui::Context,
    pub config: EditorConfig,
    pub crop: CropView,
    pub resize: ResizeView,
    pub convert: ConvertView,
    pub ui_state: UIState,
    pub textures: TextureCache,
}

impl ReaperApp {
    pub fn new(ctx: &egui::Context, config: EditorConfig) -> Result<Self> {
        let backend = Arc::new(LocalBackend::new(config.resize_filter));
        let dispatcher = |name: &str| -> Result<EditDispatcher> {
            let repaint = ctx.clone();
            EditDispatcher::spawn(
                Arc::clone(&backend),
                name,
                Arc::new(move || repaint.request_repaint()),
            )
            .with_context(|| format!("Failed to spawn {name} worker"))
        };

        let (event_tx, event_rx) = mpsc::channel();
        Ok(Self {
            event_tx,
            event_rx,
            ctx: ctx.clone(),
            crop: CropView::new(dispatcher("crop")?, config.crop_debounce()),
            resize: ResizeView::new(dispatcher("resize")?),
            convert: ConvertView::new(dispatcher("convert")?, config.default_convert_format),
            config,
            ui_state: UIState::default(),
            textures: TextureCache::default(),
        })
    }

    pub fn has_source(&self) -> bool {
        self.crop.source().is_some()
    }

    /// Drain loader/save events and edit results.
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::SourceLoaded {
                    generation,
                    source,
                    preview,
                } => {
                    if !self.ui_state.finish_load(generation) {
                        debug!(generation, "dropping stale load");
                        continue;
                    }
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}, {})",
                        source.file_name().unwrap_or("dropped image"),
                        source.size(),
                        source.format()
                    ));
                    self.install_source(ctx, source, preview);
                }
                AppEvent::LoadFailed {
                    generation,
                    message,
                } => {
                    if !self.ui_state.finish_load(generation) {
                        debug!(generation, "dropping stale load failure");
                        continue;
                    }
                    self.report_error(format!("Could not open image: {message}"));
                }
                AppEvent::PathPicked { path } => self.open_path(path),
                AppEvent::Saved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                    let notice = download_notice(&path);
                    self.ui_state
                        .show_notice(notice, self.config.notice_duration(), Instant::now());
                }
                AppEvent::SaveFailed { message } => {
                    self.report_error(format!("Save failed: {message}"));
                }
            }
        }

        for (tab, changed) in [
            (Tab::Crop, self.crop.poll()),
            (Tab::Resize, self.resize.poll()),
            (Tab::Convert, self.convert.poll()),
        ] {
            if changed {
                self.log_edit_outcome(tab);
            }
        }
    }

    fn log_edit_outcome(&mut self, tab: Tab) {
        let status = match tab {
            Tab::Crop => self.crop.status(),
            Tab::Resize => self.resize.status(),
            Tab::Convert => self.convert.status(),
        };
        let line = match status {
            EditStatus::Succeeded { params, artifact } => {
                format!("{} complete: {}", params.kind(), artifact.size())
            }
            EditStatus::Failed { params, error } => format!("{} failed: {error}", params.kind()),
            _ => return,
        };
        self.ui_state.add_log(line);
    }

    fn install_source(&mut self, ctx: &egui::Context, source: SourceImage, preview: egui::ColorImage) {
        self.textures.clear();
        self.textures.set_source(ctx, preview);
        self.crop.set_source(source.clone());
        self.resize.set_source(source.clone());
        self.convert.set_source(source);
        self.ui_state.crop_anchor = None;
    }

    /// Back to the drop zone. Results and loads still in flight are
    /// discarded when they land.
    pub fn clear_all(&mut self) {
        self.ui_state.cancel_loads();
        self.crop.clear();
        self.resize.clear();
        self.convert.clear();
        self.textures.clear();
        self.ui_state.crop_anchor = None;
        self.ui_state.add_log("Cleared".into());
    }

    pub fn report_error(&mut self, message: String) {
        warn!("{message}");
        self.ui_state.add_log(format!("ERROR: {message}"));
        self.ui_state
            .show_notice(message, self.config.notice_duration(), Instant::now());
    }

    /// Read and decode a file off the UI thread. The current source stays
    /// until the new one is ready; only the most recent load is installed.
    pub fn open_path(&mut self, path: PathBuf) {
        self.spawn_loader(move |generation| read_path(generation, &path));
    }

    pub fn open_bytes(&mut self, bytes: Vec<u8>, name: Option<String>) {
        self.spawn_loader(move |generation| match SourceImage::from_bytes(bytes, name) {
            Ok(source) => loaded(generation, source),
            Err(e) => AppEvent::LoadFailed {
                generation,
                message: e.to_string(),
            },
        });
    }

    fn spawn_loader(&mut self, job: impl FnOnce(u64) -> AppEvent + Send + 'static) {
        let generation = self.ui_state.begin_load();
        let tx = self.event_tx.clone();
        let ctx = self.ctx.clone();
        std::thread::spawn(move || send(&tx, &ctx, job(generation)));
    }

    pub fn open_dialog(&mut self) {
        let tx = self.event_tx.clone();
        let ctx = self.ctx.clone();
        let extensions: Vec<&'static str> = FileFormat::ALL
            .iter()
            .map(|f| f.extension())
            .chain(["jpg", "tif"])
            .collect();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &extensions[..])
                .add_filter("All files", &["*"])
                .pick_file()
            {
                send(&tx, &ctx, AppEvent::PathPicked { path });
            }
        });
    }

    /// Offer the result of `tab` through a native save dialog.
    pub fn download(&mut self, tab: Tab) {
        let Some((artifact, name)) = self
            .presenter(tab)
            .and_then(|p| Some((Arc::clone(p.artifact()?), p.download_name()?)))
        else {
            return;
        };

        let tx = self.event_tx.clone();
        let ctx = self.ctx.clone();
        info!(%tab, name = %name, "saving result");
        std::thread::spawn(move || {
            let event = match save(&DialogTarget, &artifact, &name) {
                Ok(SaveOutcome::Saved(path)) => AppEvent::Saved { path },
                Ok(SaveOutcome::Cancelled) => return,
                Err(e) => AppEvent::SaveFailed {
                    message: e.to_string(),
                },
            };
            send(&tx, &ctx, event);
        });
    }

    pub fn presenter(&self, tab: Tab) -> Option<ResultPresenter<'_>> {
        match tab {
            Tab::Crop => self.crop.presenter(),
            Tab::Resize => self.resize.presenter(),
            Tab::Convert => self.convert.presenter(),
        }
    }

    /// Leave result mode (or drop an error) on one tab, keeping the source.
    pub fn dismiss_result(&mut self, tab: Tab) {
        match tab {
            Tab::Crop => self.crop.dismiss_result(),
            Tab::Resize => self.resize.dismiss_result(),
            Tab::Convert => self.convert.dismiss_result(),
        }
    }

    pub fn has_result(&self, tab: Tab) -> bool {
        self.presenter(tab).is_some_and(|p| p.in_result_mode())
    }
}

/// Native "Save As" dialog pre-filled with the suggested name.
struct DialogTarget;

impl SaveTarget for DialogTarget {
    fn choose_path(&self, suggested_name: &str, format: FileFormat) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter(format.to_string(), &[format.extension()])
            .set_file_name(suggested_name)
            .save_file()
    }
}

fn read_path(generation: u64, path: &Path) -> AppEvent {
    match load_path(path) {
        Ok(source) => loaded(generation, source),
        Err(e) => AppEvent::LoadFailed {
            generation,
            message: format!("{}: {e}", path.display()),
        },
    }
}

fn loaded(generation: u64, source: SourceImage) -> AppEvent {
    match to_color_image(source.image()) {
        Ok(preview) => AppEvent::SourceLoaded {
            generation,
            source,
            preview,
        },
        Err(e) => AppEvent::LoadFailed {
            generation,
            message: e.to_string(),
        },
    }
}

fn send(tx: &mpsc::Sender<AppEvent>, ctx: &egui::Context, event: AppEvent) {
    let _ = tx.send(event);
    ctx.request_repaint();
}

impl eframe::App for ReaperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events(ctx);
        panels::dropzone::take_dropped_file(ctx, self);

        panels::menu_bar::show(ctx, self);
        panels::tabs::show(ctx, self);
        panels::status::show(ctx, self);

        if self.has_source() {
            match self.ui_state.tab {
                Tab::Crop => panels::crop::show(ctx, self),
                Tab::Resize => panels::resize::show(ctx, self),
                Tab::Convert => panels::convert::show(ctx, self),
            }
        } else {
            panels::dropzone::show(ctx, self);
        }

        panels::notice::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About Reaper")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Reaper");
                        ui.label("Crop, resize and convert images");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
