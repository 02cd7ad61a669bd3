use std::time::{Duration, Instant};

use tracing::debug;

use crate::consts::CROP_DEBOUNCE;
use crate::geometry::CropRegion;

/// Debounced crop rectangle.
///
/// `pending` follows every drag update for live feedback; `committed` only
/// changes once updates have been quiet for the debounce window, and is the
/// value used for submission.
#[derive(Clone, Debug)]
pub struct CropSelection {
    pending: Option<CropRegion>,
    committed: Option<CropRegion>,
    deadline: Option<Instant>,
    window: Duration,
    commits: u64,
}

impl Default for CropSelection {
    fn default() -> Self {
        Self::new(CROP_DEBOUNCE)
    }
}

impl CropSelection {
    pub fn new(window: Duration) -> Self {
        Self {
            pending: None,
            committed: None,
            deadline: None,
            window,
            commits: 0,
        }
    }

    pub fn pending(&self) -> Option<CropRegion> {
        self.pending
    }

    pub fn committed(&self) -> Option<CropRegion> {
        self.committed
    }

    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// When the current debounce timer fires, if one is running.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a live update and restart the debounce timer.
    pub fn update(&mut self, region: CropRegion, now: Instant) {
        self.pending = Some(region);
        self.deadline = Some(now + self.window);
    }

    /// Advance the timer. Returns the newly committed region when the quiet
    /// period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<CropRegion> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.committed = self.pending;
        self.commits += 1;
        debug!(region = ?self.committed, "crop selection committed");
        self.committed
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.committed = None;
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_commits_once_with_last_value() {
        let t0 = Instant::now();
        let mut sel = CropSelection::default();
        for i in 0..20u64 {
            sel.update(CropRegion::new(0.0, 0.0, i as f64, i as f64), t0 + ms(i * 4));
            assert_eq!(sel.poll(t0 + ms(i * 4)), None);
        }
        assert_eq!(sel.pending(), Some(CropRegion::new(0.0, 0.0, 19.0, 19.0)));
        assert_eq!(sel.committed(), None);

        // Last update at 76ms, so nothing commits before 176ms.
        assert_eq!(sel.poll(t0 + ms(175)), None);
        let committed = sel.poll(t0 + ms(176));
        assert_eq!(committed, Some(CropRegion::new(0.0, 0.0, 19.0, 19.0)));
        assert_eq!(sel.commit_count(), 1);

        assert_eq!(sel.poll(t0 + ms(500)), None);
        assert_eq!(sel.commit_count(), 1);
    }

    #[test]
    fn test_pending_tracks_updates_immediately() {
        let t0 = Instant::now();
        let mut sel = CropSelection::default();
        let r = CropRegion::new(1.0, 2.0, 3.0, 4.0);
        sel.update(r, t0);
        assert_eq!(sel.pending(), Some(r));
        assert_eq!(sel.deadline(), Some(t0 + CROP_DEBOUNCE));
    }

    #[test]
    fn test_clear_resets_everything() {
        let t0 = Instant::now();
        let mut sel = CropSelection::default();
        sel.update(CropRegion::new(1.0, 1.0, 5.0, 5.0), t0);
        sel.poll(t0 + ms(100));
        sel.update(CropRegion::new(2.0, 2.0, 5.0, 5.0), t0 + ms(150));
        sel.clear();
        assert_eq!(sel.pending(), None);
        assert_eq!(sel.committed(), None);
        assert_eq!(sel.poll(t0 + ms(1000)), None);
    }
}
