//! Lenient upstream timestamp parsing.
//!
//! Providers disagree on offset syntax: transport.opendata.ch sends
//! `2024-03-15T10:45:00+0100`, HAFAS wrappers send RFC 3339
//! (`+01:00`). Both keep their offset so wall-clock rendering shows station
//! local time.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use crate::provider::RawStop;

/// Parse an ISO 8601 timestamp with either offset form.
///
/// # Examples
///
/// ```
/// use departure_board::board::parse_timestamp;
///
/// let a = parse_timestamp("2024-03-15T10:45:00+0100").unwrap();
/// let b = parse_timestamp("2024-03-15T10:45:00+01:00").unwrap();
/// assert_eq!(a, b);
///
/// assert!(parse_timestamp("10:45").is_none());
/// assert!(parse_timestamp("").is_none());
/// ```
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Scheduled departure of a stop.
///
/// Falls back to the numeric unix timestamp (rendered in UTC) when the
/// string form is missing or unparseable.
pub fn scheduled_departure(stop: &RawStop) -> Option<DateTime<FixedOffset>> {
    stop.departure
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| {
            let secs = stop.departure_timestamp?;
            let utc = Utc.timestamp_opt(secs, 0).single()?;
            Some(utc.fixed_offset())
        })
}

/// Forecast departure of a stop, if any.
pub fn prognosis_departure(stop: &RawStop) -> Option<DateTime<FixedOffset>> {
    stop.prognosis_departure().and_then(parse_timestamp)
}

/// Whole minutes from `from` to `to`, rounded to nearest.
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<FixedOffset>) -> i64 {
    let millis = to.with_timezone(&Utc).signed_duration_since(from).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}
