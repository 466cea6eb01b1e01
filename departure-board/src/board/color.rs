//! Default line colors by transport class.

use serde::Serialize;

use crate::domain::StationConfig;

pub const TRAM_COLOR: &str = "#4ecdc4";
pub const BUS_COLOR: &str = "#ff6b6b";
pub const TRAIN_COLOR: &str = "#ffd700";
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Coarse transport class derived from a provider category string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportClass {
    Tram,
    Bus,
    Train,
    Other,
}

impl TransportClass {
    /// Classify by substring match on the lowercased category.
    ///
    /// Checked in order tram, bus, train: "str" (German Straßenbahn) is a
    /// tram even though it contains an "s", and "bus" is a bus for the same
    /// reason. The single letters "t" and "b" are the Swiss tram and bus
    /// categories.
    pub fn classify(category: &str) -> Self {
        let category = category.trim().to_lowercase();
        if category.is_empty() {
            TransportClass::Other
        } else if category == "t" || category.contains("tram") || category.contains("str") {
            TransportClass::Tram
        } else if category == "b" || category.contains("bus") {
            TransportClass::Bus
        } else if category.contains("train") || category.contains('s') {
            TransportClass::Train
        } else {
            TransportClass::Other
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TransportClass::Tram => TRAM_COLOR,
            TransportClass::Bus => BUS_COLOR,
            TransportClass::Train => TRAIN_COLOR,
            TransportClass::Other => DEFAULT_COLOR,
        }
    }
}

/// Color for a line: the station's override, else the class default.
pub fn resolve_line_color(label: &str, category: &str, config: &StationConfig) -> String {
    config
        .line_color(label)
        .map(str::to_string)
        .unwrap_or_else(|| TransportClass::classify(category).color().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_order() {
        assert_eq!(TransportClass::classify("Tram"), TransportClass::Tram);
        assert_eq!(TransportClass::classify("STR"), TransportClass::Tram);
        assert_eq!(TransportClass::classify("T"), TransportClass::Tram);
        assert_eq!(TransportClass::classify("Bus"), TransportClass::Bus);
        assert_eq!(TransportClass::classify("NFB"), TransportClass::Other);
        assert_eq!(TransportClass::classify("B"), TransportClass::Bus);
        assert_eq!(TransportClass::classify("S"), TransportClass::Train);
        assert_eq!(TransportClass::classify("train"), TransportClass::Train);
        assert_eq!(TransportClass::classify("IC"), TransportClass::Other);
        assert_eq!(TransportClass::classify(""), TransportClass::Other);
    }

    #[test]
    fn substring_matching_is_coarse() {
        // Contains an "s", so falls into the train bucket
        assert_eq!(TransportClass::classify("ship"), TransportClass::Train);
        // Tram wins over bus when both match
        assert_eq!(TransportClass::classify("trambus"), TransportClass::Tram);
    }

    #[test]
    fn override_wins() {
        let mut config = StationConfig::default();
        config.line_colors.insert("31".into(), "#000000".into());

        assert_eq!(resolve_line_color("31", "B", &config), "#000000");
        assert_eq!(resolve_line_color("32", "B", &config), BUS_COLOR);
        assert_eq!(resolve_line_color("?", "xyz", &config), DEFAULT_COLOR);
    }
}
