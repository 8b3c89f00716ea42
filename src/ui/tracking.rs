use std::sync::atomic::{AtomicBool, Ordering};

/// The only path the tracker reports.
pub const TRACKED_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    pub path: &'static str,
}

/// PageViewTracker
///
/// Reports a page view for the root path on its first mount and never again.
#[derive(Debug, Default)]
pub struct PageViewTracker {
    reported: AtomicBool,
}

impl PageViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_mount(&self) -> Option<PageView> {
        if self.reported.swap(true, Ordering::AcqRel) {
            return None;
        }
        tracing::info!(target: "page_view", path = TRACKED_PATH, "page view");
        Some(PageView { path: TRACKED_PATH })
    }
}
