//! Departure rendering pipeline.
//!
//! Turns raw provider departures into display rows (label, color, countdown,
//! delay, direction filtering) and decides how many rows fit the screen.

mod capacity;
mod color;
mod countdown;
mod label;
mod lines;
mod normalize;
mod timestamp;

pub use capacity::{MOBILE_BREAKPOINT_PX, ThemeMetrics, Viewport, compute_max_entries};
pub use color::{
    BUS_COLOR, DEFAULT_COLOR, TRAIN_COLOR, TRAM_COLOR, TransportClass, resolve_line_color,
};
pub use countdown::{Countdown, UNKNOWN_COUNTDOWN};
pub use label::{UNKNOWN_LABEL, resolve_line_label};
pub use lines::{LineSummary, discover_lines};
pub use normalize::{NormalizedDeparture, normalize};
pub use timestamp::parse_timestamp;
