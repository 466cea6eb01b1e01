//! JSON file persistence for [`AppState`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::app::AppState;
use super::error::StoreError;

/// Fields written by older versions that are dropped on load.
const LEGACY_FIELDS: &[&str] = &["fontSize"];

/// Notice shown once when saved state had to be discarded.
pub const CORRUPT_STATE_NOTICE: &str =
    "Saved settings could not be read and have been reset to defaults.";

/// Result of loading saved state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub state: AppState,
    /// User-facing message when the saved state was unusable.
    pub notice: Option<String>,
}

/// File-backed store for the application state.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the state file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved state. `Ok(None)` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<AppState>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Read {
                    message: format!("{}: {}", self.path.display(), e),
                });
            }
        };

        parse_state(&json).map(Some)
    }

    /// Load saved state, falling back to defaults.
    ///
    /// A missing file is a first run and yields defaults silently. Anything
    /// unreadable yields defaults plus a notice for the user.
    pub fn load(&self) -> Loaded {
        match self.try_load() {
            Ok(Some(state)) => Loaded {
                state,
                notice: None,
            },
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no saved state, starting fresh");
                Loaded {
                    state: AppState::default(),
                    notice: None,
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding saved state");
                Loaded {
                    state: AppState::default(),
                    notice: Some(CORRUPT_STATE_NOTICE.to_string()),
                }
            }
        }
    }

    /// Write state atomically: serialize to a sibling temp file, then rename.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                message: format!("failed to create state directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|e| StoreError::Serialize {
            message: e.to_string(),
        })?;

        let tmp = self.tmp_path();
        std::fs::write(&tmp, json).map_err(|e| StoreError::Write {
            message: format!("{}: {}", tmp.display(), e),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Write {
            message: format!("{}: {}", self.path.display(), e),
        })?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn parse_state(json: &str) -> Result<AppState, StoreError> {
    let mut value: Value = serde_json::from_str(json).map_err(|e| StoreError::Corrupt {
        message: e.to_string(),
    })?;

    if let Value::Object(fields) = &mut value {
        for legacy in LEGACY_FIELDS {
            if fields.remove(*legacy).is_some() {
                tracing::debug!(field = *legacy, "pruned legacy state field");
            }
        }
    }

    serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
        message: e.to_string(),
    })
}
