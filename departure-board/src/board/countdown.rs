//! Time-until-departure display.

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::Language;

use super::timestamp::minutes_between;

/// Token shown when a departure has no usable timestamp.
pub const UNKNOWN_COUNTDOWN: &str = "N/A";

/// Countdowns of an hour or more switch to wall-clock time.
const CLOCK_THRESHOLD_MINS: i64 = 60;

/// A departure's countdown, before localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Due or already departed.
    Now,
    /// Departs in 1..=59 minutes.
    Minutes(i64),
    /// Departs an hour or more from now.
    At(DateTime<FixedOffset>),
    /// No usable timestamp.
    Unknown,
}

impl Countdown {
    /// Compute the countdown for a departure time relative to `now`.
    pub fn compute(departure: Option<DateTime<FixedOffset>>, now: DateTime<Utc>) -> Self {
        let Some(departure) = departure else {
            return Countdown::Unknown;
        };

        let diff = minutes_between(now, departure);
        if diff <= 0 {
            Countdown::Now
        } else if diff < CLOCK_THRESHOLD_MINS {
            Countdown::Minutes(diff)
        } else {
            Countdown::At(departure)
        }
    }

    /// Localized display text.
    ///
    /// # Examples
    ///
    /// ```
    /// use departure_board::board::Countdown;
    /// use departure_board::domain::Language;
    ///
    /// assert_eq!(Countdown::Minutes(5).text(Language::En), "5'");
    /// assert_eq!(Countdown::Now.text(Language::De), "jetzt");
    /// assert_eq!(Countdown::Unknown.text(Language::En), "N/A");
    /// ```
    pub fn text(&self, language: Language) -> String {
        match self {
            Countdown::Now => language.now_token().to_string(),
            Countdown::Minutes(m) => format!("{m}'"),
            Countdown::At(at) => language.format_clock(at),
            Countdown::Unknown => UNKNOWN_COUNTDOWN.to_string(),
        }
    }
}
