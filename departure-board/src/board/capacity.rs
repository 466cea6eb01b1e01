//! How many departure rows fit the viewport.
//!
//! Outside fullscreen the board scrolls with the page and shows a fixed
//! number of rows. In fullscreen, vertical space is the binding constraint:
//! subtract the theme's fixed chrome and a safety buffer from the viewport
//! height and divide by the row height, clamped to the theme's bounds.

use serde::{Deserialize, Serialize};

use crate::domain::Theme;

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

const MOBILE_BUFFER_PX: i64 = 20;
const DESKTOP_BUFFER_PX: i64 = 15;

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub height: u32,
    pub width: u32,
}

impl Viewport {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }
}

/// Calibrated layout constants for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMetrics {
    /// Board title bar.
    pub header_px: i64,
    /// Column header row of the table layout.
    pub column_header_px: i64,
    /// Fixed padding around the board.
    pub padding_px: i64,
    /// Height of one departure row.
    pub row_px: i64,
    /// Lower clamp in fullscreen.
    pub min_entries: usize,
    /// Upper clamp in fullscreen.
    pub max_entries: usize,
    /// Row count outside fullscreen.
    pub windowed_entries: usize,
}

impl ThemeMetrics {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_led() {
            ThemeMetrics {
                header_px: 50,
                column_header_px: 0,
                padding_px: 20,
                row_px: 40,
                min_entries: 6,
                max_entries: 50,
                windowed_entries: 8,
            }
        } else {
            ThemeMetrics {
                header_px: 100,
                column_header_px: 45,
                padding_px: 30,
                row_px: 60,
                min_entries: 8,
                max_entries: 60,
                windowed_entries: 10,
            }
        }
    }

    /// Header, column header and padding.
    pub fn reserved_px(&self) -> i64 {
        self.header_px + self.column_header_px + self.padding_px
    }
}

/// Maximum number of rows to render per station board.
///
/// Always within `[min_entries, max_entries]` of the theme in fullscreen,
/// whatever the viewport.
///
/// # Examples
///
/// ```
/// use departure_board::board::{Viewport, compute_max_entries};
/// use departure_board::domain::Theme;
///
/// assert_eq!(compute_max_entries(Theme::Led, false, Viewport::new(900, 1600)), 8);
/// assert_eq!(compute_max_entries(Theme::Dark, false, Viewport::new(900, 1600)), 10);
///
/// // 1080 - (100 + 45 + 30) - 15 = 890px → 14 rows of 60px
/// assert_eq!(compute_max_entries(Theme::Light, true, Viewport::new(1080, 1920)), 14);
/// ```
pub fn compute_max_entries(theme: Theme, is_fullscreen: bool, viewport: Viewport) -> usize {
    let metrics = ThemeMetrics::for_theme(theme);

    if !is_fullscreen {
        return metrics.windowed_entries;
    }

    let buffer_px = if viewport.is_mobile() {
        MOBILE_BUFFER_PX
    } else {
        DESKTOP_BUFFER_PX
    };

    let available = i64::from(viewport.height) - metrics.reserved_px() - buffer_px;
    let rows = available.div_euclid(metrics.row_px);

    let min = metrics.min_entries as i64;
    let max = metrics.max_entries as i64;
    rows.clamp(min, max) as usize
}
