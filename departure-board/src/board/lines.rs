//! Line discovery for the customization step.

use serde::Serialize;

use crate::domain::StationConfig;
use crate::provider::RawDeparture;

use super::color::resolve_line_color;
use super::label::resolve_line_label;

/// A line seen on a station board, with the directions it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub label: String,
    pub category: String,
    /// Current color (override or default).
    pub color: String,
    /// Distinct non-empty destinations, in first-seen order.
    pub directions: Vec<String>,
}

impl LineSummary {
    /// Direction filters are only offered for lines with several directions.
    pub fn has_direction_filter(&self) -> bool {
        self.directions.len() > 1
    }
}

/// Collect the distinct lines of a raw board in first-seen order.
///
/// Direction filters are not applied: the customization UI needs every
/// known direction to offer it.
pub fn discover_lines(raw: &[RawDeparture], config: &StationConfig) -> Vec<LineSummary> {
    let mut lines: Vec<LineSummary> = Vec::new();

    for departure in raw {
        let label = resolve_line_label(
            departure.category.as_deref(),
            departure.number.as_deref(),
            departure.name.as_deref(),
        );
        let destination = departure.to.as_deref().map(str::trim).unwrap_or("");

        let index = match lines.iter().position(|l| l.label == label) {
            Some(index) => index,
            None => {
                let category = departure.category.clone().unwrap_or_default();
                lines.push(LineSummary {
                    color: resolve_line_color(&label, &category, config),
                    label,
                    category,
                    directions: Vec::new(),
                });
                lines.len() - 1
            }
        };

        let line = &mut lines[index];
        if !destination.is_empty() && !line.directions.iter().any(|d| d == destination) {
            line.directions.push(destination.to_string());
        }
    }

    lines
}
