//! Periodic refresh of every configured board.
//!
//! A poll fetches all selected stations concurrently, normalizes each board
//! and publishes the results as one snapshot. A station whose fetch fails
//! shows an empty, flagged board; the other stations are unaffected.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::board::normalize;
use crate::domain::{Country, Language, StationConfig};
use crate::provider::Providers;
use crate::state::AppState;
use crate::timer::TaskGuard;

use super::snapshot::{BoardSnapshot, SnapshotCell, StationBoardView};

/// The parts of [`AppState`] a poll depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTarget {
    pub country: Country,
    pub stations: Vec<StationConfig>,
    pub language: Language,
}

impl PollTarget {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            country: state.country,
            stations: state.stations.clone(),
            language: state.language,
        }
    }
}

/// Fetches and normalizes boards into a [`SnapshotCell`].
#[derive(Clone)]
pub struct Poller {
    providers: Providers,
    cell: SnapshotCell,
}

impl Poller {
    pub fn new(providers: Providers, cell: SnapshotCell) -> Self {
        Self { providers, cell }
    }

    pub fn cell(&self) -> &SnapshotCell {
        &self.cell
    }

    /// Run one poll cycle and publish its snapshot.
    ///
    /// Unselected slots are skipped.
    pub async fn poll_once(&self, target: &PollTarget, now: DateTime<Utc>) -> Arc<BoardSnapshot> {
        let fetches = target
            .stations
            .iter()
            .enumerate()
            .filter(|(_, station)| station.is_selected())
            .map(|(slot, station)| self.fetch_board(target, slot, station, now));

        let boards = join_all(fetches).await;

        let snapshot = Arc::new(BoardSnapshot {
            fetched_at: Some(now),
            boards,
        });

        tracing::debug!(
            boards = snapshot.boards.len(),
            failed = snapshot.failed_count(),
            "poll complete"
        );

        self.cell.replace(snapshot.clone()).await;
        snapshot
    }

    async fn fetch_board(
        &self,
        target: &PollTarget,
        slot: usize,
        station: &StationConfig,
        now: DateTime<Utc>,
    ) -> StationBoardView {
        let board = self
            .providers
            .get_station_board(target.country, &station.id)
            .await;

        let (departures, failed) = match board {
            Some(board) => (
                normalize(&board.departures, station, now, target.language),
                false,
            ),
            None => (Vec::new(), true),
        };

        StationBoardView {
            slot,
            station_id: station.id.clone(),
            display_name: station.display_name().to_string(),
            departures,
            failed,
        }
    }

    /// Start polling every `period`, and again whenever the target changes.
    ///
    /// The loop ends when the handle is dropped or the target sender is
    /// gone.
    pub fn spawn(self, mut target: watch::Receiver<PollTarget>, period: Duration) -> MonitorHandle {
        let task = TaskGuard::spawn(async move {
            tracing::info!(period_secs = period.as_secs(), "monitor started");

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    changed = target.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        interval.reset();
                    }
                }

                let current = target.borrow_and_update().clone();
                self.poll_once(&current, Utc::now()).await;
            }

            tracing::info!("monitor stopped");
        });

        MonitorHandle { _task: task }
    }
}

/// Running poll loop. Dropping it stops polling.
#[derive(Debug)]
pub struct MonitorHandle {
    _task: TaskGuard,
}
