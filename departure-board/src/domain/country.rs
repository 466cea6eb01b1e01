//! Supported countries and their provider codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a country key or code is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown country: {input}")]
pub struct UnknownCountry {
    input: String,
}

impl UnknownCountry {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// A country the board can be configured for.
///
/// Persisted state stores the long key (`"switzerland"`); provider and proxy
/// boundaries use the two-letter code (`"ch"`). The mapping between the two is
/// a fixed bijection.
///
/// # Examples
///
/// ```
/// use departure_board::domain::Country;
///
/// let ch = Country::from_code("ch").unwrap();
/// assert_eq!(ch, Country::Switzerland);
/// assert_eq!(ch.key(), "switzerland");
/// assert_eq!(Country::from_key("switzerland").unwrap().code(), "ch");
///
/// assert!(Country::from_code("xx").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[default]
    Switzerland,
    Germany,
    Austria,
    France,
    Italy,
    Canada,
}

/// Key ↔ code table used at every provider boundary.
const COUNTRY_TABLE: [(Country, &str, &str); 6] = [
    (Country::Switzerland, "switzerland", "ch"),
    (Country::Germany, "germany", "de"),
    (Country::Austria, "austria", "at"),
    (Country::France, "france", "fr"),
    (Country::Italy, "italy", "it"),
    (Country::Canada, "canada", "ca"),
];

impl Country {
    /// Every supported country, in table order.
    pub const ALL: [Country; 6] = [
        Country::Switzerland,
        Country::Germany,
        Country::Austria,
        Country::France,
        Country::Italy,
        Country::Canada,
    ];

    fn entry(self) -> (Country, &'static str, &'static str) {
        // Table rows follow variant declaration order.
        COUNTRY_TABLE[self as usize]
    }

    /// The long key, e.g. `"germany"`.
    pub fn key(self) -> &'static str {
        self.entry().1
    }

    /// The two-letter code, e.g. `"de"`.
    pub fn code(self) -> &'static str {
        self.entry().2
    }

    /// Look up a country by its long key (case-insensitive).
    pub fn from_key(key: &str) -> Result<Self, UnknownCountry> {
        let wanted = key.trim();
        COUNTRY_TABLE
            .into_iter()
            .find(|(_, k, _)| k.eq_ignore_ascii_case(wanted))
            .map(|(c, _, _)| c)
            .ok_or_else(|| UnknownCountry::new(key))
    }

    /// Look up a country by its two-letter code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, UnknownCountry> {
        let wanted = code.trim();
        COUNTRY_TABLE
            .into_iter()
            .find(|(_, _, c)| c.eq_ignore_ascii_case(wanted))
            .map(|(c, _, _)| c)
            .ok_or_else(|| UnknownCountry::new(code))
    }

    /// Accept either a key or a code.
    pub fn parse(s: &str) -> Result<Self, UnknownCountry> {
        Self::from_code(s).or_else(|_| Self::from_key(s))
    }

    /// Map a long key to its code.
    pub fn code_for_key(key: &str) -> Result<&'static str, UnknownCountry> {
        Self::from_key(key).map(Country::code)
    }

    /// Map a code back to its long key.
    pub fn key_for_code(code: &str) -> Result<&'static str, UnknownCountry> {
        Self::from_code(code).map(Country::key)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
