//! The controller that owns the application state.
//!
//! Every user action goes through [`Controller`]. It applies the change to
//! [`AppState`], persists the result, and keeps the background work in step
//! with the new state: the poll runs exactly while the phase is monitoring,
//! and capacity follows theme and fullscreen changes.

use std::sync::{Mutex as StdMutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};

use crate::board::{Viewport, discover_lines};
use crate::config::MonitorConfig;
use crate::domain::{Country, Language, Location, StationConfig, StationUpdate, Theme};
use crate::monitor::{
    BoardSnapshot, CapacityInputs, MonitorHandle, PollTarget, Poller, SnapshotCell,
    ViewportTracker,
};
use crate::provider::Providers;
use crate::state::{AppState, Loaded, Phase, Restored, StateStore, reconcile};

use super::error::WizardError;
use super::lines::LineOption;
use super::search::{SearchResults, StationSearch};

/// Display preference changes. Absent fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
    pub is_fullscreen: Option<bool>,
}

/// What the monitor page needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorView {
    pub phase: Phase,
    pub theme: Theme,
    pub language: Language,
    pub is_fullscreen: bool,
    pub configuration_complete: bool,
    /// Rows shown per board.
    pub max_entries: usize,
    /// Latest poll, capped to `max_entries` per board.
    pub snapshot: BoardSnapshot,
}

/// Owner of the application state and its background tasks.
pub struct Controller {
    state: Mutex<AppState>,
    store: StateStore,
    providers: Providers,
    config: MonitorConfig,
    target: watch::Sender<PollTarget>,
    poller: Poller,
    monitor: StdMutex<Option<MonitorHandle>>,
    viewport: ViewportTracker,
    search: StationSearch,
    notices: StdMutex<Vec<String>>,
}

impl Controller {
    /// Restore saved state and resume monitoring if it applies.
    ///
    /// Must be called within a tokio runtime.
    pub fn open(store: StateStore, providers: Providers, config: MonitorConfig) -> Self {
        let Loaded { state, notice } = store.load();
        let Restored {
            state,
            resumed_monitoring,
        } = reconcile(state);

        tracing::info!(
            phase = ?state.phase,
            country = %state.country,
            stations = state.stations.len(),
            "state restored"
        );

        let (target, _) = watch::channel(PollTarget::from_state(&state));
        let viewport = ViewportTracker::new(
            CapacityInputs {
                theme: state.theme,
                is_fullscreen: state.is_fullscreen,
                viewport: Viewport::default(),
            },
            config.resize_debounce(),
        );

        let controller = Self {
            search: StationSearch::new(providers.clone(), config.search_debounce()),
            poller: Poller::new(providers.clone(), SnapshotCell::new()),
            state: Mutex::new(state),
            store,
            providers,
            config,
            target,
            monitor: StdMutex::new(None),
            viewport,
            notices: StdMutex::new(notice.into_iter().collect()),
        };

        if resumed_monitoring {
            controller.start_monitor();
        }

        controller
    }

    /// Current state.
    pub async fn state(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Choose the country. Discards every configured station.
    pub async fn set_country(&self, country: Country) -> AppState {
        let mut state = self.state.lock().await;
        if state.country != country {
            state.set_country(country);
            self.search.clear();
        }
        self.commit(&state);
        state.clone()
    }

    /// Choose how many boards to show. Discards every configured station.
    pub async fn set_station_count(&self, count: usize) -> Result<AppState, WizardError> {
        let mut state = self.state.lock().await;
        state.set_station_count(count)?;
        self.commit(&state);
        Ok(state.clone())
    }

    /// Put a search result into a board slot.
    pub async fn select_station(
        &self,
        index: usize,
        location: &Location,
    ) -> Result<AppState, WizardError> {
        let mut state = self.state.lock().await;
        *state.station_mut(index)? = StationConfig::from_location(location);
        self.search.clear();
        self.commit(&state);
        Ok(state.clone())
    }

    /// Merge a shallow update into one slot.
    pub async fn update_station(
        &self,
        index: usize,
        update: StationUpdate,
    ) -> Result<StationConfig, WizardError> {
        let mut state = self.state.lock().await;
        let station = state.station_mut(index)?;
        station.apply(update);
        let updated = station.clone();
        self.commit(&state);
        Ok(updated)
    }

    /// Lines currently seen at a slot's station, for customization.
    ///
    /// Empty when the slot is unselected or the board is unavailable.
    pub async fn line_options(&self, index: usize) -> Result<Vec<LineOption>, WizardError> {
        let (country, station) = {
            let state = self.state.lock().await;
            (state.country, state.station(index)?.clone())
        };

        if !station.is_selected() {
            return Ok(Vec::new());
        }

        let Some(board) = self.providers.get_station_board(country, &station.id).await else {
            return Ok(Vec::new());
        };

        Ok(discover_lines(&board.departures, &station)
            .into_iter()
            .map(|line| LineOption::new(line, &station))
            .collect())
    }

    /// Show or hide one direction of a line at a slot.
    pub async fn toggle_direction(
        &self,
        index: usize,
        line: &str,
        direction: &str,
        shown: bool,
    ) -> Result<StationConfig, WizardError> {
        let known: Vec<String> = self
            .line_options(index)
            .await?
            .into_iter()
            .find(|option| option.line.label == line)
            .map(|option| option.line.directions)
            .unwrap_or_default();

        let mut state = self.state.lock().await;
        let station = state.station_mut(index)?;
        station.toggle_direction(line, direction, shown, &known);
        let updated = station.clone();
        self.commit(&state);
        Ok(updated)
    }

    /// Change language, theme or fullscreen.
    pub async fn set_preferences(&self, update: PreferencesUpdate) -> AppState {
        let mut state = self.state.lock().await;
        if let Some(language) = update.language {
            state.language = language;
        }
        if let Some(theme) = update.theme {
            state.theme = theme;
        }
        if let Some(is_fullscreen) = update.is_fullscreen {
            state.is_fullscreen = is_fullscreen;
        }
        self.viewport.set_display(state.theme, state.is_fullscreen);
        self.commit(&state);
        state.clone()
    }

    /// Move to the next wizard step.
    ///
    /// Leaving station search or customization requires every slot to hold
    /// a selected station.
    pub async fn advance(&self) -> Result<AppState, WizardError> {
        let mut state = self.state.lock().await;
        let from = state.phase;

        // Includes a restored monitoring session that was never resumed.
        if matches!(
            from,
            Phase::StationSearch | Phase::Customization | Phase::Monitoring
        ) && !state.configuration_complete()
        {
            let selected = state.stations.iter().filter(|s| s.is_selected()).count();
            return Err(WizardError::IncompleteConfiguration {
                phase: from,
                missing: state.station_count.saturating_sub(selected),
                count: state.station_count,
            });
        }

        state.phase = from.next();
        if from == Phase::StationSearch {
            self.search.clear();
        }
        self.commit(&state);
        self.sync_monitor(state.phase).await;
        Ok(state.clone())
    }

    /// Move to the previous wizard step.
    pub async fn back(&self) -> AppState {
        let mut state = self.state.lock().await;
        state.phase = state.phase.back();
        self.commit(&state);
        self.sync_monitor(state.phase).await;
        state.clone()
    }

    /// Record a keystroke in the station search box.
    pub async fn search_input(&self, query: &str) {
        let country = self.state.lock().await.country;
        self.search.input(country, query);
    }

    pub fn search_results(&self) -> SearchResults {
        self.search.results()
    }

    /// Record a viewport size change.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set_viewport(viewport);
    }

    pub fn capacity(&self) -> usize {
        self.viewport.capacity()
    }

    /// Current board, capped to the current capacity.
    pub async fn monitor_view(&self) -> MonitorView {
        let state = self.state().await;
        let max_entries = self.viewport.capacity();
        let snapshot = self.poller.cell().get().await.capped(max_entries);

        MonitorView {
            phase: state.phase,
            theme: state.theme,
            language: state.language,
            is_fullscreen: state.is_fullscreen,
            configuration_complete: state.configuration_complete(),
            max_entries,
            snapshot,
        }
    }

    /// Drain pending user notices.
    pub fn take_notices(&self) -> Vec<String> {
        std::mem::take(&mut *self.notices_slot())
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitor_slot().is_some()
    }

    /// Stop background work and write the final state.
    pub async fn shutdown(&self) {
        self.stop_monitor();
        self.search.clear();
        self.viewport.cancel();

        let state = self.state.lock().await;
        self.commit(&state);
        tracing::info!("controller shut down");
    }

    /// Persist and publish a changed state.
    fn commit(&self, state: &AppState) {
        if let Err(e) = self.store.save(state) {
            tracing::warn!(path = %self.store.path().display(), error = %e, "failed to save state");
        }

        let next = PollTarget::from_state(state);
        self.target.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    async fn sync_monitor(&self, phase: Phase) {
        if phase == Phase::Monitoring {
            self.start_monitor();
        } else if self.stop_monitor() {
            self.poller.cell().clear().await;
        }
    }

    fn start_monitor(&self) {
        let mut monitor = self.monitor_slot();
        if monitor.is_none() {
            let handle = self
                .poller
                .clone()
                .spawn(self.target.subscribe(), self.config.poll_interval());
            *monitor = Some(handle);
        }
    }

    /// Returns whether a poll loop was running.
    fn stop_monitor(&self) -> bool {
        let handle = self.monitor_slot().take();
        handle.is_some()
    }

    fn monitor_slot(&self) -> std::sync::MutexGuard<'_, Option<MonitorHandle>> {
        self.monitor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notices_slot(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DirectionStatus, DomainError};
    use crate::provider::ProvidersConfig;
    use crate::state::CORRUPT_STATE_NOTICE;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    const TRAM_BOARD: &str = r#"{
        "station": { "id": "8591382", "name": "Zürich, Stauffacher" },
        "departures": [
            { "category": "T", "number": "2", "to": "Farbhof", "stop": { "departure": "2024-03-15T10:05:00+0100" } },
            { "category": "T", "number": "2", "to": "Tiefenbrunnen", "stop": { "departure": "2024-03-15T10:06:00+0100" } },
            { "category": "T", "number": "3", "to": "Klusplatz", "stop": { "departure": "2024-03-15T10:07:00+0100" } }
        ]
    }"#;

    const BUS_BOARD: &str = r#"{
        "station": { "id": "8591123", "name": "Zürich, Hardplatz" },
        "departures": [
            { "category": "B", "number": "31", "to": "Hegibachplatz", "stop": { "departure": "2024-03-15T10:05:00+0100" } }
        ]
    }"#;

    struct Harness {
        dir: TempDir,
        providers: Providers,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let fixtures = dir.path().join("fixtures");
            std::fs::create_dir(&fixtures).unwrap();
            std::fs::write(fixtures.join("8591382.json"), TRAM_BOARD).unwrap();
            std::fs::write(fixtures.join("8591123.json"), BUS_BOARD).unwrap();
            let providers =
                Providers::new(ProvidersConfig::new().with_fixture_dir(&fixtures)).unwrap();
            Self { dir, providers }
        }

        fn state_path(&self) -> std::path::PathBuf {
            self.dir.path().join("state.json")
        }

        fn open(&self) -> Controller {
            Controller::open(
                StateStore::new(self.state_path()),
                self.providers.clone(),
                MonitorConfig::default(),
            )
        }

        fn save(&self, state: &AppState) {
            StateStore::new(self.state_path()).save(state).unwrap();
        }
    }

    fn tram() -> Location {
        Location::new("8591382", "Zürich, Stauffacher")
    }

    fn bus() -> Location {
        Location::new("8591123", "Zürich, Hardplatz")
    }

    fn saved_phase(path: &Path) -> Phase {
        StateStore::new(path).try_load().unwrap().unwrap().phase
    }

    async fn wait_for_boards(controller: &Controller, n: usize) -> MonitorView {
        for _ in 0..200 {
            let view = controller.monitor_view().await;
            if view.snapshot.boards.len() == n {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("monitor never published {n} boards");
    }

    #[tokio::test]
    async fn fresh_start() {
        let harness = Harness::new();
        let controller = harness.open();

        assert_eq!(controller.state().await, AppState::default());
        assert!(controller.take_notices().is_empty());
        assert!(!controller.is_monitoring());
    }

    #[tokio::test]
    async fn corrupt_state_notice_is_shown_once() {
        let harness = Harness::new();
        std::fs::write(harness.state_path(), "not json").unwrap();

        let controller = harness.open();
        assert_eq!(controller.state().await, AppState::default());
        assert_eq!(controller.take_notices(), [CORRUPT_STATE_NOTICE]);
        assert!(controller.take_notices().is_empty());
    }

    #[tokio::test]
    async fn full_wizard_flow() {
        let harness = Harness::new();
        let controller = harness.open();

        controller.set_country(Country::Switzerland).await;
        assert_eq!(controller.advance().await.unwrap().phase, Phase::StationCount);

        controller.set_station_count(2).await.unwrap();
        assert_eq!(controller.advance().await.unwrap().phase, Phase::StationSearch);

        assert_eq!(
            controller.advance().await.unwrap_err(),
            WizardError::IncompleteConfiguration {
                phase: Phase::StationSearch,
                missing: 2,
                count: 2
            }
        );

        controller.select_station(0, &tram()).await.unwrap();
        controller.select_station(1, &bus()).await.unwrap();
        assert_eq!(controller.advance().await.unwrap().phase, Phase::Customization);

        let state = controller.advance().await.unwrap();
        assert_eq!(state.phase, Phase::Monitoring);
        assert!(controller.is_monitoring());
        assert_eq!(saved_phase(&harness.state_path()), Phase::Monitoring);

        let view = wait_for_boards(&controller, 2).await;
        assert!(view.configuration_complete);
        assert_eq!(view.max_entries, 10);
        assert_eq!(view.snapshot.boards[0].departures.len(), 3);
        assert_eq!(view.snapshot.boards[1].departures[0].line_label, "31");

        assert_eq!(controller.back().await.phase, Phase::Customization);
        assert!(!controller.is_monitoring());
        assert!(controller.monitor_view().await.snapshot.boards.is_empty());

        controller.shutdown().await;
    }

    #[tokio::test]
    async fn country_and_count_changes_reset_stations() {
        let harness = Harness::new();
        let controller = harness.open();

        controller.select_station(0, &tram()).await.unwrap();
        let state = controller.set_country(Country::Germany).await;
        assert_eq!(state.stations, vec![StationConfig::default()]);

        controller.select_station(0, &tram()).await.unwrap();
        let state = controller.set_station_count(3).await.unwrap();
        assert_eq!(state.stations, vec![StationConfig::default(); 3]);

        assert_eq!(
            controller.set_station_count(9).await.unwrap_err(),
            WizardError::Domain(DomainError::InvalidStationCount {
                count: 9,
                min: 1,
                max: 4
            })
        );
    }

    #[tokio::test]
    async fn complete_monitoring_session_resumes() {
        let harness = Harness::new();
        let mut state = AppState::default();
        state.stations = vec![StationConfig::from_location(&tram())];
        state.phase = Phase::Monitoring;
        harness.save(&state);

        let controller = harness.open();
        assert!(controller.is_monitoring());
        wait_for_boards(&controller, 1).await;
    }

    #[tokio::test]
    async fn incomplete_monitoring_session_is_not_resumed() {
        let harness = Harness::new();
        let mut state = AppState::default();
        state.station_count = 2;
        state.stations = vec![StationConfig::from_location(&tram())];
        state.phase = Phase::Monitoring;
        harness.save(&state);

        let controller = harness.open();
        assert_eq!(controller.state().await.phase, Phase::Monitoring);
        assert!(!controller.is_monitoring());

        let view = controller.monitor_view().await;
        assert!(!view.configuration_complete);
        assert!(view.snapshot.boards.is_empty());

        let err = controller.advance().await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::IncompleteConfiguration {
                phase: Phase::Monitoring,
                missing: 1,
                count: 2
            }
        ));
        assert!(!controller.is_monitoring());
    }

    #[tokio::test]
    async fn customization_round_trip() {
        let harness = Harness::new();
        let controller = harness.open();
        controller.select_station(0, &tram()).await.unwrap();

        let options = controller.line_options(0).await.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].line.label, "2");
        assert!(options[0].show_direction_filter);
        assert!(!options[1].show_direction_filter);

        let station = controller
            .toggle_direction(0, "2", "Farbhof", false)
            .await
            .unwrap();
        assert_eq!(station.blocked_directions("2"), ["Farbhof"]);
        assert_eq!(
            station.direction_status("2", &options[0].line.directions),
            DirectionStatus::PartiallyHidden { hidden: 1, total: 2 }
        );

        let station = controller
            .toggle_direction(0, "2", "Farbhof", true)
            .await
            .unwrap();
        assert!(station.line_directions.is_empty());

        let station = controller
            .update_station(
                0,
                StationUpdate {
                    custom_name: Some("Work".into()),
                    ..StationUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(station.display_name(), "Work");

        assert_eq!(
            controller
                .update_station(5, StationUpdate::default())
                .await
                .unwrap_err(),
            WizardError::Domain(DomainError::StationIndexOutOfRange { index: 5, count: 1 })
        );
    }

    #[tokio::test]
    async fn unselected_slot_has_no_lines() {
        let harness = Harness::new();
        let controller = harness.open();
        assert!(controller.line_options(0).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn preferences_drive_capacity() {
        let harness = Harness::new();
        let controller = harness.open();
        controller.set_viewport(Viewport::new(1080, 1920));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(controller.capacity(), 10);

        let state = controller
            .set_preferences(PreferencesUpdate {
                theme: Some(Theme::Led),
                is_fullscreen: Some(true),
                ..PreferencesUpdate::default()
            })
            .await;
        assert_eq!(state.theme, Theme::Led);
        assert_eq!(state.language, Language::En);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(controller.capacity(), 24);
    }

    #[tokio::test(start_paused = true)]
    async fn search_uses_current_country() {
        let harness = Harness::new();
        let controller = harness.open();

        controller.search_input("Stauff").await;
        tokio::time::sleep(Duration::from_millis(400)).await;

        let results = controller.search_results();
        assert_eq!(results.locations.len(), 1);
        assert_eq!(results.locations[0].id, "8591382");

        controller.select_station(0, &tram()).await.unwrap();
        assert!(controller.search_results().locations.is_empty());
    }
}
