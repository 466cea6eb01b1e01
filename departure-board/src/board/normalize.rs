//! Raw departures → display-ready rows.
//!
//! Normalization is a pure function of the raw batch, the station's
//! configuration, the clock and the language. Malformed records degrade to
//! placeholders; nothing here rejects a batch.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::domain::{Language, StationConfig};
use crate::provider::RawDeparture;

use super::color::resolve_line_color;
use super::countdown::Countdown;
use super::label::resolve_line_label;
use super::timestamp::{minutes_between, prognosis_departure, scheduled_departure};

/// One board row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDeparture {
    /// Resolved line label, e.g. "S12" or "31".
    pub line_label: String,

    /// Line color (`#rrggbb`).
    pub color: String,

    /// Upstream category, empty when absent.
    pub category: String,

    /// Destination, empty when absent.
    pub destination: String,

    /// Scheduled departure, when parseable.
    pub scheduled_at: Option<DateTime<FixedOffset>>,

    /// Localized countdown, e.g. "5'", "now", "14:05", "N/A".
    pub countdown_text: String,

    /// Delay against schedule in whole minutes, never negative.
    pub delay_minutes: u32,

    /// Platform, forecast first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl NormalizedDeparture {
    /// Delay cell text. Empty for on-time departures; the renderer still
    /// emits the cell so rows keep the same height.
    pub fn delay_text(&self) -> String {
        if self.delay_minutes == 0 {
            String::new()
        } else {
            format!("+{}'", self.delay_minutes)
        }
    }
}

/// Normalize a station's raw departures.
///
/// Upstream order is preserved. Departures whose destination is on the
/// line's block-list are dropped.
pub fn normalize(
    raw: &[RawDeparture],
    config: &StationConfig,
    now: DateTime<Utc>,
    language: Language,
) -> Vec<NormalizedDeparture> {
    raw.iter()
        .filter_map(|departure| normalize_one(departure, config, now, language))
        .collect()
}

fn normalize_one(
    raw: &RawDeparture,
    config: &StationConfig,
    now: DateTime<Utc>,
    language: Language,
) -> Option<NormalizedDeparture> {
    let line_label = resolve_line_label(
        raw.category.as_deref(),
        raw.number.as_deref(),
        raw.name.as_deref(),
    );
    // Trimmed the same way as in `discover_lines`, so stored filters match.
    let destination = raw.to.as_deref().map(str::trim).unwrap_or("").to_string();

    if config.is_direction_hidden(&line_label, &destination) {
        tracing::trace!(line = %line_label, %destination, "direction filtered");
        return None;
    }

    let category = raw.category.clone().unwrap_or_default();
    let color = resolve_line_color(&line_label, &category, config);

    let scheduled = scheduled_departure(&raw.stop);
    let prognosis = prognosis_departure(&raw.stop);
    if scheduled.is_none() && prognosis.is_none() {
        tracing::debug!(line = %line_label, departure = ?raw.stop.departure, "no usable departure time");
    }

    let countdown = Countdown::compute(prognosis.or(scheduled), now);

    let delay_minutes = match (scheduled, prognosis) {
        (Some(scheduled), Some(actual)) => {
            let delay = minutes_between(scheduled.with_timezone(&Utc), actual);
            u32::try_from(delay.max(0)).unwrap_or(u32::MAX)
        }
        _ => 0,
    };

    Some(NormalizedDeparture {
        line_label,
        color,
        category,
        destination,
        scheduled_at: scheduled,
        countdown_text: countdown.text(language),
        delay_minutes,
        platform: raw.stop.effective_platform().map(str::to_string),
    })
}
