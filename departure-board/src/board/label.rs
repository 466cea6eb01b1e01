//! Line label resolution.
//!
//! Providers split line identity across `category`, `number` and `name`.
//! The resolved label is also the key for per-line color overrides and
//! direction filters, so it must be stable for a given upstream record.

/// Categories that keep their prefix in the label ("S" + "12" → "S12").
const RAIL_PREFIXES: [&str; 6] = ["S", "IR", "IC", "ICE", "R", "RE"];

/// Names longer than this many characters are truncated.
const MAX_NAME_CHARS: usize = 6;

/// Characters kept from a truncated name.
const TRUNCATED_CHARS: usize = 4;

/// Label used when nothing identifies the line.
pub const UNKNOWN_LABEL: &str = "?";

fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the display label for a line. First matching rule wins:
///
/// 1. category and number: rail categories prefix the number, others use
///    the number alone;
/// 2. category only: the uppercased category;
/// 3. number only: the number;
/// 4. the name, truncated to four characters plus `..` when longer than six;
/// 5. `"?"`.
///
/// # Examples
///
/// ```
/// use departure_board::board::resolve_line_label;
///
/// assert_eq!(resolve_line_label(Some("S"), Some("12"), None), "S12");
/// assert_eq!(resolve_line_label(Some("B"), Some("31"), None), "31");
/// assert_eq!(resolve_line_label(None, None, Some("LongLine1")), "Long..");
/// assert_eq!(resolve_line_label(None, None, None), "?");
/// ```
pub fn resolve_line_label(
    category: Option<&str>,
    number: Option<&str>,
    name: Option<&str>,
) -> String {
    match (present(category), present(number)) {
        (Some(category), Some(number)) => {
            let is_rail = RAIL_PREFIXES
                .iter()
                .any(|p| p.eq_ignore_ascii_case(category));
            if is_rail {
                format!("{}{}", category.to_uppercase(), number)
            } else {
                number.to_string()
            }
        }
        (Some(category), None) => category.to_uppercase(),
        (None, Some(number)) => number.to_string(),
        (None, None) => match present(name) {
            Some(name) if name.chars().count() > MAX_NAME_CHARS => {
                let head: String = name.chars().take(TRUNCATED_CHARS).collect();
                format!("{head}..")
            }
            Some(name) => name.to_string(),
            None => UNKNOWN_LABEL.to_string(),
        },
    }
}
