//! Per-line customization options.

use serde::Serialize;

use crate::board::LineSummary;
use crate::domain::{Severity, StationConfig};

/// A line as offered in the customization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOption {
    #[serde(flatten)]
    pub line: LineSummary,
    /// Directions currently hidden.
    pub hidden: Vec<String>,
    pub status: String,
    pub severity: Severity,
    /// Whether to show the direction checkboxes at all.
    pub show_direction_filter: bool,
}

impl LineOption {
    pub fn new(line: LineSummary, station: &StationConfig) -> Self {
        let status = station.direction_status(&line.label, &line.directions);
        Self {
            hidden: station.blocked_directions(&line.label).to_vec(),
            status: status.label(),
            severity: status.severity(),
            show_direction_filter: line.has_direction_filter(),
            line,
        }
    }
}
