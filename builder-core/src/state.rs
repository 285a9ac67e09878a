//! Editor view settings.

use serde::{Deserialize, Serialize};

/// Responsive preview preset of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Full-width preview.
    #[default]
    Desktop,
    /// Tablet-width preview.
    Tablet,
    /// Phone-width preview.
    Mobile,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// CSS width of the canvas when previewing at this breakpoint.
    #[must_use]
    pub const fn preview_width(self) -> &'static str {
        match self {
            Self::Desktop => "100%",
            Self::Tablet => "768px",
            Self::Mobile => "375px",
        }
    }
}

/// View settings that do not affect page data and are not part of undo
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    /// Whether the editor chrome uses the dark theme.
    pub is_dark_mode: bool,
    /// Current preview breakpoint.
    pub current_breakpoint: Breakpoint,
}

impl ViewSettings {
    /// Flip the theme and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.is_dark_mode = !self.is_dark_mode;
        self.is_dark_mode
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            is_dark_mode: true,
            current_breakpoint: Breakpoint::Desktop,
        }
    }
}
