//! The single application state object and the wizard phases.

use serde::{Deserialize, Serialize};

use crate::domain::{Country, DomainError, Language, StationConfig, Theme};

/// Fewest boards a user can configure.
pub const MIN_STATIONS: usize = 1;

/// Most boards a user can configure.
pub const MAX_STATIONS: usize = 4;

/// Wizard step currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Country,
    StationCount,
    StationSearch,
    Customization,
    Monitoring,
}

impl Phase {
    /// Following step; monitoring is terminal.
    pub fn next(self) -> Phase {
        match self {
            Phase::Country => Phase::StationCount,
            Phase::StationCount => Phase::StationSearch,
            Phase::StationSearch => Phase::Customization,
            Phase::Customization => Phase::Monitoring,
            Phase::Monitoring => Phase::Monitoring,
        }
    }

    /// Preceding step; country is the first.
    pub fn back(self) -> Phase {
        match self {
            Phase::Country => Phase::Country,
            Phase::StationCount => Phase::Country,
            Phase::StationSearch => Phase::StationCount,
            Phase::Customization => Phase::StationSearch,
            Phase::Monitoring => Phase::Customization,
        }
    }
}

/// Everything the user has configured, persisted on every change.
///
/// Missing fields take their defaults on load, so state written by older
/// versions still restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub country: Country,
    pub station_count: usize,
    pub stations: Vec<StationConfig>,
    pub phase: Phase,
    pub language: Language,
    pub theme: Theme,
    pub is_fullscreen: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            country: Country::default(),
            station_count: MIN_STATIONS,
            stations: vec![StationConfig::default(); MIN_STATIONS],
            phase: Phase::default(),
            language: Language::default(),
            theme: Theme::default(),
            is_fullscreen: false,
        }
    }
}

impl AppState {
    /// One slot per configured station, each holding a selected station.
    pub fn configuration_complete(&self) -> bool {
        self.stations.len() == self.station_count
            && self.stations.iter().all(StationConfig::is_selected)
    }

    /// Replace the station list with `station_count` empty slots.
    pub fn reset_stations(&mut self) {
        self.stations = vec![StationConfig::default(); self.station_count];
    }

    /// Change the number of boards, discarding every configured station.
    pub fn set_station_count(&mut self, count: usize) -> Result<(), DomainError> {
        if !(MIN_STATIONS..=MAX_STATIONS).contains(&count) {
            return Err(DomainError::InvalidStationCount {
                count,
                min: MIN_STATIONS,
                max: MAX_STATIONS,
            });
        }
        self.station_count = count;
        self.reset_stations();
        Ok(())
    }

    /// Change the country, discarding every configured station.
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
        self.reset_stations();
    }

    pub fn station(&self, index: usize) -> Result<&StationConfig, DomainError> {
        let count = self.stations.len();
        self.stations
            .get(index)
            .ok_or(DomainError::StationIndexOutOfRange { index, count })
    }

    pub fn station_mut(&mut self, index: usize) -> Result<&mut StationConfig, DomainError> {
        let count = self.stations.len();
        self.stations
            .get_mut(index)
            .ok_or(DomainError::StationIndexOutOfRange { index, count })
    }
}
