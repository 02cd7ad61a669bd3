use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reaper_core::geometry::Point;
use reaper_core::source::EncodedImage;
use tracing::warn;

use crate::convert::to_color_image;

const MAX_LOG_LINES: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Crop,
    Resize,
    Convert,
}

impl Tab {
    pub const ALL: &[Self] = &[Self::Crop, Self::Resize, Self::Convert];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crop => write!(f, "Crop"),
            Self::Resize => write!(f, "Resize"),
            Self::Convert => write!(f, "Convert"),
        }
    }
}

/// Transient message shown over the viewport.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub expires: Instant,
}

pub struct UIState {
    pub tab: Tab,
    pub notice: Option<Notice>,
    pub log_messages: Vec<String>,
    /// The latest file load is still being read and decoded off-thread.
    pub loading: bool,
    load_generation: u64,
    /// Where the current crop drag started, relative to the unscaled image.
    pub crop_anchor: Option<Point>,
    pub show_about: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            notice: None,
            log_messages: Vec::new(),
            loading: false,
            load_generation: 0,
            crop_anchor: None,
            show_about: false,
        }
    }
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }

    /// Start a load and return its generation. Earlier loads become stale.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.loading = true;
        self.load_generation
    }

    /// A load finished. Returns false for a stale one, which must be
    /// dropped and leaves `loading` alone.
    pub fn finish_load(&mut self, generation: u64) -> bool {
        if generation != self.load_generation {
            return false;
        }
        self.loading = false;
        true
    }

    /// Make every load still in flight stale.
    pub fn cancel_loads(&mut self) {
        self.load_generation += 1;
        self.loading = false;
    }

    pub fn show_notice(&mut self, message: String, duration: Duration, now: Instant) {
        self.notice = Some(Notice {
            message,
            expires: now + duration,
        });
    }

    /// Current notice, dropping it once expired.
    pub fn active_notice(&mut self, now: Instant) -> Option<&Notice> {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires) {
            self.notice = None;
        }
        self.notice.as_ref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Source,
    Result(Tab),
}

struct CachedTexture {
    image: Option<Arc<EncodedImage>>,
    handle: egui::TextureHandle,
}

/// GPU textures for the source and each view's result, rebuilt only when
/// the underlying image changes.
#[derive(Default)]
pub struct TextureCache {
    entries: HashMap<TextureSlot, CachedTexture>,
}

impl TextureCache {
    /// Install an already decoded preview for the source.
    pub fn set_source(&mut self, ctx: &egui::Context, image: egui::ColorImage) {
        let handle = ctx.load_texture("source", image, egui::TextureOptions::LINEAR);
        self.entries.insert(
            TextureSlot::Source,
            CachedTexture {
                image: None,
                handle,
            },
        );
    }

    pub fn source(&self) -> Option<&egui::TextureHandle> {
        self.entries.get(&TextureSlot::Source).map(|c| &c.handle)
    }

    /// Texture for a result artifact, decoding it on first use.
    pub fn result(
        &mut self,
        ctx: &egui::Context,
        tab: Tab,
        image: &Arc<EncodedImage>,
    ) -> Option<&egui::TextureHandle> {
        let slot = TextureSlot::Result(tab);
        let fresh = self
            .entries
            .get(&slot)
            .and_then(|c| c.image.as_ref())
            .is_some_and(|cached| Arc::ptr_eq(cached, image));
        if !fresh {
            let color = match to_color_image(image) {
                Ok(c) => c,
                Err(e) => {
                    warn!(%tab, error = %e, "result preview could not be decoded");
                    self.entries.remove(&slot);
                    return None;
                }
            };
            let handle = ctx.load_texture(format!("result-{tab}"), color, egui::TextureOptions::LINEAR);
            self.entries.insert(
                slot,
                CachedTexture {
                    image: Some(Arc::clone(image)),
                    handle,
                },
            );
        }
        self.entries.get(&slot).map(|c| &c.handle)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let mut ui = UIState::default();
        let t0 = Instant::now();
        ui.show_notice("Download complete: a.png".into(), Duration::from_millis(3000), t0);
        assert!(ui.active_notice(t0 + Duration::from_millis(2999)).is_some());
        assert!(ui.active_notice(t0 + Duration::from_millis(3000)).is_none());
        assert!(ui.notice.is_none());
    }

    #[test]
    fn test_only_latest_load_is_applied() {
        let mut ui = UIState::default();
        let first = ui.begin_load();
        let second = ui.begin_load();

        assert!(!ui.finish_load(first));
        assert!(ui.loading);
        assert!(ui.finish_load(second));
        assert!(!ui.loading);
    }

    #[test]
    fn test_cancelled_load_is_dropped() {
        let mut ui = UIState::default();
        let load = ui.begin_load();
        ui.cancel_loads();
        assert!(!ui.loading);
        assert!(!ui.finish_load(load));

        let next = ui.begin_load();
        assert!(ui.finish_load(next));
    }

    #[test]
    fn test_log_is_capped() {
        let mut ui = UIState::default();
        for i in 0..(MAX_LOG_LINES + 10) {
            ui.add_log(format!("line {i}"));
        }
        assert_eq!(ui.log_messages.len(), MAX_LOG_LINES);
        assert_eq!(ui.log_messages[0], "line 10");
    }
}
