//! Per-station board configuration.
//!
//! A [`StationConfig`] occupies one board slot. Besides the selected station
//! it carries display customizations keyed by line label: a color override
//! and a direction filter.
//!
//! Direction filters are **block-lists**: the directions listed for a line are
//! hidden, an absent or empty list shows everything. The customization UI
//! presents them as "checked = shown" checkboxes, so [`StationConfig::toggle_direction`]
//! translates between the two and keeps the stored form canonical.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Location;

/// Configuration of one board slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationConfig {
    /// Provider station identifier. Empty while the slot is unselected.
    #[serde(default)]
    pub id: String,

    /// Station name as reported by the provider.
    #[serde(default)]
    pub name: String,

    /// User-chosen display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,

    /// Line label → color override (`#rrggbb`).
    ///
    /// Keys that no longer match a resolved label are ignored.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub line_colors: BTreeMap<String, String>,

    /// Line label → directions to hide.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub line_directions: BTreeMap<String, Vec<String>>,
}

/// Shallow partial update for a [`StationConfig`].
///
/// Fields that are present replace the stored value wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    /// An empty or blank name clears the override.
    pub custom_name: Option<String>,
    pub line_colors: Option<BTreeMap<String, String>>,
    pub line_directions: Option<BTreeMap<String, Vec<String>>>,
}

/// How much of a line's traffic its direction filter lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionStatus {
    /// No filter: every direction is shown.
    AllShown,
    /// The filter blocks every known direction.
    NoneShown,
    /// Some directions are hidden.
    PartiallyHidden { hidden: usize, total: usize },
}

/// How prominently the UI should flag a [`DirectionStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl DirectionStatus {
    pub fn label(&self) -> String {
        match self {
            DirectionStatus::AllShown => "All directions shown".to_string(),
            DirectionStatus::NoneShown => "No directions selected".to_string(),
            DirectionStatus::PartiallyHidden { hidden, total } => {
                format!("{hidden} of {total} hidden")
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DirectionStatus::AllShown => Severity::Info,
            DirectionStatus::PartiallyHidden { .. } => Severity::Warning,
            DirectionStatus::NoneShown => Severity::Error,
        }
    }
}

impl StationConfig {
    /// Configuration for a freshly selected station, without customizations.
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: location.id.clone(),
            name: location.name.clone(),
            ..Self::default()
        }
    }

    /// Whether the slot holds a selected station.
    pub fn is_selected(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty()
    }

    /// Name to show on the board: the override if set, else the station name.
    pub fn display_name(&self) -> &str {
        self.custom_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// Color override for a line, if any.
    pub fn line_color(&self, line: &str) -> Option<&str> {
        self.line_colors.get(line).map(String::as_str)
    }

    /// Set or clear a line color override.
    pub fn set_line_color(&mut self, line: &str, color: Option<String>) {
        match color {
            Some(color) => {
                self.line_colors.insert(line.to_string(), color);
            }
            None => {
                self.line_colors.remove(line);
            }
        }
    }

    /// Directions hidden for a line. Empty means all are shown.
    pub fn blocked_directions(&self, line: &str) -> &[String] {
        self.line_directions
            .get(line)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether departures of `line` towards `direction` are suppressed.
    pub fn is_direction_hidden(&self, line: &str, direction: &str) -> bool {
        self.blocked_directions(line).iter().any(|d| d == direction)
    }

    /// Filter state for a line whose current directions are `known`.
    ///
    /// Blocked entries the line no longer serves are not counted.
    pub fn direction_status(&self, line: &str, known: &[String]) -> DirectionStatus {
        let total = known.len();
        let hidden = known
            .iter()
            .filter(|d| self.is_direction_hidden(line, d))
            .count();
        if hidden == 0 {
            DirectionStatus::AllShown
        } else if hidden >= total {
            DirectionStatus::NoneShown
        } else {
            DirectionStatus::PartiallyHidden { hidden, total }
        }
    }

    /// Apply a checkbox change for one direction of a line.
    ///
    /// `shown == true` removes the direction from the block-list, `false`
    /// adds it. Afterwards, a block-list that hides none of the `known`
    /// directions is dropped entirely, so "show everything" always has the
    /// single stored form of an absent entry.
    pub fn toggle_direction(&mut self, line: &str, direction: &str, shown: bool, known: &[String]) {
        let blocked = self.line_directions.entry(line.to_string()).or_default();

        if shown {
            blocked.retain(|d| d != direction);
        } else if !blocked.iter().any(|d| d == direction) {
            blocked.push(direction.to_string());
        }

        let hides_nothing = blocked.is_empty()
            || (!known.is_empty() && !blocked.iter().any(|d| known.contains(d)));
        if hides_nothing {
            self.line_directions.remove(line);
        }
    }

    /// Merge a partial update into this configuration.
    pub fn apply(&mut self, update: StationUpdate) {
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(custom_name) = update.custom_name {
            let trimmed = custom_name.trim();
            self.custom_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        if let Some(colors) = update.line_colors {
            self.line_colors = colors;
        }
        if let Some(directions) = update.line_directions {
            self.line_directions = directions
                .into_iter()
                .filter(|(_, blocked)| !blocked.is_empty())
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn station() -> StationConfig {
        StationConfig::from_location(&Location::new("8591382", "Zürich, Stauffacher"))
    }

    #[test]
    fn selection_requires_id_and_name() {
        assert!(!StationConfig::default().is_selected());
        assert!(station().is_selected());

        let mut no_name = station();
        no_name.name.clear();
        assert!(!no_name.is_selected());
    }

    #[test]
    fn display_name_prefers_override() {
        let mut s = station();
        assert_eq!(s.display_name(), "Zürich, Stauffacher");

        s.custom_name = Some("Home".into());
        assert_eq!(s.display_name(), "Home");

        s.custom_name = Some("   ".into());
        assert_eq!(s.display_name(), "Zürich, Stauffacher");
    }

    #[test]
    fn status_three_states() {
        let known = dirs(&["Farbhof", "Tiefenbrunnen", "Bucheggplatz"]);
        let mut s = station();
        assert_eq!(s.direction_status("2", &known), DirectionStatus::AllShown);

        s.line_directions.insert("2".into(), dirs(&["Farbhof"]));
        assert_eq!(
            s.direction_status("2", &known),
            DirectionStatus::PartiallyHidden { hidden: 1, total: 3 }
        );
        assert_eq!(s.direction_status("2", &known).label(), "1 of 3 hidden");

        s.line_directions.insert("2".into(), known.clone());
        assert_eq!(s.direction_status("2", &known), DirectionStatus::NoneShown);
        assert_eq!(s.direction_status("2", &known).label(), "No directions selected");
        assert_eq!(s.direction_status("2", &known).severity(), Severity::Error);
    }

    #[test]
    fn status_ignores_directions_no_longer_served() {
        let known = dirs(&["Farbhof", "Tiefenbrunnen"]);
        let mut s = station();
        s.line_directions
            .insert("2".into(), dirs(&["Altstetten", "Farbhof"]));

        assert_eq!(
            s.direction_status("2", &known),
            DirectionStatus::PartiallyHidden { hidden: 1, total: 2 }
        );

        s.line_directions.insert("2".into(), dirs(&["Altstetten"]));
        assert_eq!(s.direction_status("2", &known), DirectionStatus::AllShown);
    }

    #[test]
    fn unchecking_hides_direction() {
        let known = dirs(&["Farbhof", "Tiefenbrunnen"]);
        let mut s = station();

        s.toggle_direction("2", "Farbhof", false, &known);
        assert_eq!(s.blocked_directions("2"), ["Farbhof"]);
        assert!(s.is_direction_hidden("2", "Farbhof"));
        assert!(!s.is_direction_hidden("2", "Tiefenbrunnen"));

        // Unchecking twice does not duplicate
        s.toggle_direction("2", "Farbhof", false, &known);
        assert_eq!(s.blocked_directions("2").len(), 1);
    }

    #[test]
    fn unchecking_everything_shows_nothing() {
        let known = dirs(&["Farbhof", "Tiefenbrunnen"]);
        let mut s = station();

        s.toggle_direction("2", "Farbhof", false, &known);
        s.toggle_direction("2", "Tiefenbrunnen", false, &known);
        assert_eq!(s.direction_status("2", &known), DirectionStatus::NoneShown);
    }

    #[test]
    fn checking_everything_collapses_to_show_all() {
        let known = dirs(&["Farbhof", "Tiefenbrunnen"]);
        let mut s = station();
        s.toggle_direction("2", "Farbhof", false, &known);
        s.toggle_direction("2", "Tiefenbrunnen", false, &known);

        s.toggle_direction("2", "Farbhof", true, &known);
        s.toggle_direction("2", "Tiefenbrunnen", true, &known);

        assert!(!s.line_directions.contains_key("2"));
        assert_eq!(s.direction_status("2", &known), DirectionStatus::AllShown);
    }

    #[test]
    fn stale_entries_collapse_once_known_directions_are_shown() {
        let known = dirs(&["Farbhof", "Tiefenbrunnen"]);
        let mut s = station();
        // "Altstetten" is no longer served by the line
        s.line_directions
            .insert("2".into(), dirs(&["Altstetten", "Farbhof"]));

        s.toggle_direction("2", "Farbhof", true, &known);

        assert!(s.line_directions.is_empty());
    }

    #[test]
    fn other_lines_untouched() {
        let known = dirs(&["A", "B"]);
        let mut s = station();
        s.toggle_direction("3", "A", false, &known);
        s.toggle_direction("2", "A", false, &known);
        s.toggle_direction("2", "A", true, &known);

        assert_eq!(s.blocked_directions("3"), ["A"]);
        assert!(s.blocked_directions("2").is_empty());
    }

    #[test]
    fn apply_is_shallow() {
        let mut s = station();
        s.line_colors.insert("2".into(), "#123456".into());
        s.line_directions.insert("2".into(), dirs(&["Farbhof"]));

        s.apply(StationUpdate {
            custom_name: Some("  Work ".into()),
            line_colors: Some(BTreeMap::from([("3".to_string(), "#abcdef".to_string())])),
            ..StationUpdate::default()
        });

        assert_eq!(s.custom_name.as_deref(), Some("Work"));
        assert_eq!(s.line_color("2"), None);
        assert_eq!(s.line_color("3"), Some("#abcdef"));
        // Untouched field survives
        assert_eq!(s.blocked_directions("2"), ["Farbhof"]);
        assert_eq!(s.id, "8591382");
    }

    #[test]
    fn apply_clears_blank_custom_name_and_empty_filters() {
        let mut s = station();
        s.custom_name = Some("Home".into());

        s.apply(StationUpdate {
            custom_name: Some(String::new()),
            line_directions: Some(BTreeMap::from([("2".to_string(), Vec::new())])),
            ..StationUpdate::default()
        });

        assert_eq!(s.custom_name, None);
        assert!(s.line_directions.is_empty());
    }

    #[test]
    fn set_line_color_insert_and_remove() {
        let mut s = station();
        s.set_line_color("S12", Some("#ff0000".into()));
        assert_eq!(s.line_color("S12"), Some("#ff0000"));
        s.set_line_color("S12", None);
        assert_eq!(s.line_color("S12"), None);
    }

    #[test]
    fn serde_camel_case_and_defaults() {
        let json = r##"{"id":"1","name":"Bern","customName":"B","lineColors":{"S1":"#fff000"}}"##;
        let s: StationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(s.custom_name.as_deref(), Some("B"));
        assert_eq!(s.line_color("S1"), Some("#fff000"));
        assert!(s.line_directions.is_empty());

        let out = serde_json::to_string(&StationConfig::default()).unwrap();
        assert_eq!(out, r#"{"id":"","name":""}"#);
    }
}
