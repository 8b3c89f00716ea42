//! Page-shell behavior: layout chrome rules, scroll controls and page-view tracking.
//!
//! These are plain state types so the rules can be checked without a browser; the
//! shell renderer turns them into markup and the matching client script.

pub mod layout;
pub mod scroll;
pub mod tracking;

pub use layout::{ADMIN_PREFIX, Chrome, ShellContent, is_admin_path, js_string, render_shell};
pub use scroll::{BACK_TO_TOP_THRESHOLD_PX, BackToTop, ScrollBehavior, ScrollCommand, ScrollReset};
pub use tracking::{PageView, PageViewTracker, TRACKED_PATH};
