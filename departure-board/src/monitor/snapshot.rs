//! Results of one poll cycle, swapped in as a whole.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::board::NormalizedDeparture;

/// One station's board as of the last poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoardView {
    /// Board slot in the configured station list.
    pub slot: usize,
    pub station_id: String,
    /// Custom name if set, else the station name.
    pub display_name: String,
    pub departures: Vec<NormalizedDeparture>,
    /// The fetch failed; `departures` is empty.
    pub failed: bool,
}

/// Every configured board as of one poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// `None` until the first poll completes.
    pub fetched_at: Option<DateTime<Utc>>,
    pub boards: Vec<StationBoardView>,
}

impl BoardSnapshot {
    /// Copy with at most `max_entries` departures per board.
    ///
    /// Truncation affects only what is displayed; the snapshot keeps the
    /// full fetch.
    pub fn capped(&self, max_entries: usize) -> BoardSnapshot {
        BoardSnapshot {
            fetched_at: self.fetched_at,
            boards: self
                .boards
                .iter()
                .map(|board| StationBoardView {
                    departures: board.departures.iter().take(max_entries).cloned().collect(),
                    ..board.clone()
                })
                .collect(),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.boards.iter().filter(|b| b.failed).count()
    }
}

/// Shared slot holding the latest snapshot.
///
/// Readers get an `Arc` to a complete snapshot; a poll publishes by
/// replacing the whole value.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCell {
    inner: Arc<RwLock<Arc<BoardSnapshot>>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Arc<BoardSnapshot> {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, snapshot: Arc<BoardSnapshot>) {
        *self.inner.write().await = snapshot;
    }

    /// Forget the last poll.
    pub async fn clear(&self) {
        self.replace(Arc::new(BoardSnapshot::default())).await;
    }
}
