/// Vertical offset, in pixels, past which the back-to-top control appears.
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

impl ScrollBehavior {
    pub fn as_str(self) -> &'static str {
        match self {
            ScrollBehavior::Smooth => "smooth",
        }
    }
}

/// A scroll the client should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollCommand {
    pub fn to_top() -> Self {
        Self {
            top: 0.0,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// BackToTop
///
/// Visibility of the floating back-to-top button.
#[derive(Debug, Default)]
pub struct BackToTop {
    visible: bool,
}

impl BackToTop {
    /// Updates visibility from the current scroll offset and returns it.
    pub fn on_scroll(&mut self, offset_px: f64) -> bool {
        self.visible = offset_px > BACK_TO_TOP_THRESHOLD_PX;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn click(&self) -> ScrollCommand {
        ScrollCommand::to_top()
    }
}

/// ScrollReset
///
/// Scrolls to the top whenever the route path changes, including the first render.
#[derive(Debug, Default)]
pub struct ScrollReset {
    current: Option<String>,
}

impl ScrollReset {
    pub fn on_navigate(&mut self, path: &str) -> Option<ScrollCommand> {
        if self.current.as_deref() == Some(path) {
            return None;
        }
        self.current = Some(path.to_string());
        Some(ScrollCommand::to_top())
    }
}
