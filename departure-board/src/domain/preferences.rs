//! Display preferences: language and visual theme.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// UI language. Only the strings the board pipeline itself produces are
/// localized here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    It,
}

impl Language {
    /// Countdown token for a departure that is due or already gone.
    pub fn now_token(self) -> &'static str {
        match self {
            Language::En => "now",
            Language::De => "jetzt",
            Language::Fr => "maint.",
            Language::It => "ora",
        }
    }

    /// Format a wall-clock time in the departure's own offset.
    pub fn format_clock(self, at: &DateTime<FixedOffset>) -> String {
        match self {
            Language::En => at.format("%-I:%M %p").to_string(),
            Language::De | Language::Fr | Language::It => at.format("%H:%M").to_string(),
        }
    }
}

/// Visual theme of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Standard table on a light background.
    #[default]
    Light,
    /// Standard table on a dark background.
    Dark,
    /// Flip-dot / LED matrix emulation.
    Led,
}

impl Theme {
    pub fn is_led(self) -> bool {
        matches!(self, Theme::Led)
    }

    /// CSS class used by the rendered board.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
            Theme::Led => "theme-led",
        }
    }
}
