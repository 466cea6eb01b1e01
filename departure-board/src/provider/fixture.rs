//! Fixture provider for running without network access.
//!
//! Loads station boards from JSON files and serves them as if they were
//! live API responses.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::Location;

use super::error::ProviderError;
use super::types::StationBoard;

/// Provider that serves station boards from a directory of JSON files.
///
/// Expects files named `{station_id}.json` holding a [`StationBoard`].
/// Departure times are served as stored, so countdowns drift as the
/// fixtures age.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    boards: Arc<BTreeMap<String, StationBoard>>,
}

impl FixtureProvider {
    /// Load every `*.json` file in `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let dir = dir.as_ref();
        let mut boards = BTreeMap::new();

        let entries = std::fs::read_dir(dir).map_err(|e| ProviderError::Fixture {
            message: format!("failed to read fixture directory {}: {}", dir.display(), e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ProviderError::Fixture {
                message: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let json = std::fs::read_to_string(&path).map_err(|e| ProviderError::Fixture {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;

            let board: StationBoard =
                serde_json::from_str(&json).map_err(|e| ProviderError::Fixture {
                    message: format!("failed to parse {}: {}", path.display(), e),
                })?;

            boards.insert(id.to_string(), board);
        }

        if boards.is_empty() {
            return Err(ProviderError::Fixture {
                message: format!("no fixture boards found in {}", dir.display()),
            });
        }

        tracing::info!(count = boards.len(), dir = %dir.display(), "loaded fixture boards");

        Ok(Self {
            boards: Arc::new(boards),
        })
    }

    /// Stations whose name contains `query`, case-insensitively.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Location> {
        let needle = query.trim().to_lowercase();
        self.boards
            .iter()
            .map(|(id, board)| self.location_of(id, board))
            .filter(|loc| loc.name.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// The stored board for a station.
    pub fn station_board(&self, station_id: &str) -> Result<StationBoard, ProviderError> {
        self.boards
            .get(station_id)
            .cloned()
            .ok_or_else(|| ProviderError::StationNotFound(station_id.to_string()))
    }

    /// Identifiers of every loaded board.
    pub fn station_ids(&self) -> Vec<String> {
        self.boards.keys().cloned().collect()
    }

    fn location_of(&self, id: &str, board: &StationBoard) -> Location {
        match &board.station {
            Some(station) => Location {
                id: id.to_string(),
                ..station.clone()
            },
            None => Location::new(id, id),
        }
    }
}
