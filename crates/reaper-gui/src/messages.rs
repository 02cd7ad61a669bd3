use std::path::PathBuf;

use reaper_core::source::SourceImage;

/// Results sent back to the UI thread from loader and save threads.
pub enum AppEvent {
    /// `generation` identifies the load that produced the event; see
    /// [`crate::state::UIState::begin_load`].
    SourceLoaded {
        generation: u64,
        source: SourceImage,
        preview: egui::ColorImage,
    },
    LoadFailed {
        generation: u64,
        message: String,
    },
    /// The open dialog returned a file; loading starts on the UI thread.
    PathPicked {
        path: PathBuf,
    },
    Saved {
        path: PathBuf,
    },
    SaveFailed {
        message: String,
    },
}
