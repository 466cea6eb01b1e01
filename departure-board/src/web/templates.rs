//! Askama templates for the web frontend.

use askama::Template;

use crate::board::NormalizedDeparture;
use crate::domain::{Country, StationConfig};
use crate::monitor::StationBoardView;
use crate::state::{AppState, Phase};
use crate::wizard::MonitorView;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Configuration page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub theme_class: &'static str,
    pub phase: &'static str,
    pub countries: Vec<CountryOption>,
    pub station_count: usize,
    pub slots: Vec<SlotView>,
    pub language: String,
    pub is_fullscreen: bool,
    pub notices: Vec<String>,
}

impl IndexTemplate {
    pub fn new(state: &AppState, notices: Vec<String>) -> Self {
        Self {
            theme_class: state.theme.css_class(),
            phase: phase_name(state.phase),
            countries: Country::ALL
                .into_iter()
                .map(|country| CountryOption {
                    key: country.key(),
                    code: country.code(),
                    selected: country == state.country,
                })
                .collect(),
            station_count: state.station_count,
            slots: state
                .stations
                .iter()
                .enumerate()
                .map(|(index, station)| SlotView::from_station(index, station))
                .collect(),
            language: serde_json::to_value(state.language)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            is_fullscreen: state.is_fullscreen,
            notices,
        }
    }
}

/// Departure board page.
#[derive(Template)]
#[template(path = "monitor.html")]
pub struct MonitorTemplate {
    pub theme_class: &'static str,
    pub is_led: bool,
    pub is_fullscreen: bool,
    pub refresh_secs: u64,
    pub configuration_complete: bool,
    pub fetched_at: Option<String>,
    pub boards: Vec<BoardView>,
}

impl MonitorTemplate {
    pub fn new(view: &MonitorView, refresh_secs: u64) -> Self {
        Self {
            theme_class: view.theme.css_class(),
            is_led: view.theme.is_led(),
            is_fullscreen: view.is_fullscreen,
            refresh_secs,
            configuration_complete: view.configuration_complete,
            fetched_at: view
                .snapshot
                .fetched_at
                .map(|at| at.format("%H:%M:%S UTC").to_string()),
            boards: view.snapshot.boards.iter().map(BoardView::from_board).collect(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Entry of the country picker.
#[derive(Debug, Clone)]
pub struct CountryOption {
    pub key: &'static str,
    pub code: &'static str,
    pub selected: bool,
}

/// One board slot on the configuration page.
#[derive(Debug, Clone)]
pub struct SlotView {
    pub index: usize,
    pub name: String,
    pub selected: bool,
}

impl SlotView {
    pub fn from_station(index: usize, station: &StationConfig) -> Self {
        Self {
            index,
            name: station.display_name().to_string(),
            selected: station.is_selected(),
        }
    }

    /// Slot number as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// One station board.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub name: String,
    pub failed: bool,
    pub rows: Vec<RowView>,
}

impl BoardView {
    pub fn from_board(board: &StationBoardView) -> Self {
        Self {
            name: board.display_name.clone(),
            failed: board.failed,
            rows: board.departures.iter().map(RowView::from_departure).collect(),
        }
    }
}

/// One departure row.
#[derive(Debug, Clone)]
pub struct RowView {
    pub label: String,
    pub color: String,
    pub destination: String,
    pub countdown: String,
    /// Empty when on time. The cell is rendered regardless.
    pub delay: String,
    pub platform: String,
}

impl RowView {
    pub fn from_departure(departure: &NormalizedDeparture) -> Self {
        Self {
            label: departure.line_label.clone(),
            color: departure.color.clone(),
            destination: departure.destination.clone(),
            countdown: departure.countdown_text.clone(),
            delay: departure.delay_text(),
            platform: departure.platform.clone().unwrap_or_default(),
        }
    }

    pub fn is_delayed(&self) -> bool {
        !self.delay.is_empty()
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Country => "country",
        Phase::StationCount => "stationCount",
        Phase::StationSearch => "stationSearch",
        Phase::Customization => "customization",
        Phase::Monitoring => "monitoring",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Theme};
    use crate::monitor::BoardSnapshot;

    fn departure(delay_minutes: u32) -> NormalizedDeparture {
        NormalizedDeparture {
            line_label: "31".into(),
            color: "#ff6b6b".into(),
            category: "B".into(),
            destination: "Hegibachplatz".into(),
            scheduled_at: None,
            countdown_text: "5'".into(),
            delay_minutes,
            platform: None,
        }
    }

    fn view(theme: Theme, delay_minutes: u32) -> MonitorView {
        MonitorView {
            phase: Phase::Monitoring,
            theme,
            language: Default::default(),
            is_fullscreen: false,
            configuration_complete: true,
            max_entries: 10,
            snapshot: BoardSnapshot {
                fetched_at: None,
                boards: vec![StationBoardView {
                    slot: 0,
                    station_id: "8591123".into(),
                    display_name: "Hardplatz".into(),
                    departures: vec![departure(delay_minutes)],
                    failed: false,
                }],
            },
        }
    }

    #[test]
    fn row_delay_text() {
        assert!(!RowView::from_departure(&departure(0)).is_delayed());
        let row = RowView::from_departure(&departure(3));
        assert!(row.is_delayed());
        assert_eq!(row.delay, "+3'");
    }

    #[test]
    fn table_layout_keeps_empty_delay_cell() {
        let html = MonitorTemplate::new(&view(Theme::Dark, 0), 20)
            .render()
            .unwrap();
        assert!(html.contains("theme-dark"));
        assert!(html.contains("Hegibachplatz"));
        assert!(html.contains(r#"<td class="delay"></td>"#));
    }

    #[test]
    fn led_layout() {
        let html = MonitorTemplate::new(&view(Theme::Led, 2), 20)
            .render()
            .unwrap();
        assert!(html.contains("led-board"));
        assert!(html.contains("+2&#x27;") || html.contains("+2'"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn led_layout_keeps_empty_delay_slot() {
        let html = MonitorTemplate::new(&view(Theme::Led, 0), 20)
            .render()
            .unwrap();
        assert!(html.contains(r#"<span class="led-delay"></span>"#));
    }

    #[test]
    fn led_delay_slot_has_fixed_size() {
        let css = std::fs::read_to_string(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static/board.css"),
        )
        .unwrap();
        let rule = &css[css.find(".led-delay {").unwrap()..];
        let rule = &rule[..rule.find('}').unwrap()];
        assert!(rule.contains("display: inline-block"));
        assert!(rule.contains("min-height: 40px"));
    }

    #[test]
    fn index_lists_slots() {
        let mut state = AppState::default();
        state.stations = vec![StationConfig::from_location(&Location::new("1", "Bern"))];
        let template = IndexTemplate::new(&state, vec!["hello".into()]);
        assert_eq!(template.language, "en");
        assert!(template.countries[0].selected);

        let html = template.render().unwrap();
        assert!(html.contains("Bern"));
        assert!(html.contains("hello"));
    }
}
