//! Owned timer resources.
//!
//! Background work (the poll interval, debounced search and resize handling)
//! runs in tokio tasks held by a [`TaskGuard`]. Dropping the guard aborts the
//! task, so a timer can never outlive whatever owns it and fire against
//! stale state.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// A spawned task that is aborted when the guard is dropped.
#[derive(Debug)]
pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl TaskGuard {
    /// Spawn `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs an action once input has been quiet for `delay`.
///
/// Each [`Debouncer::call`] replaces the pending action, aborting it even if
/// it has already started running.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<TaskGuard>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` after the quiet period, cancelling any pending one.
    pub fn call<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let guard = TaskGuard::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        // The previous guard drops here, aborting its task.
        let previous = self.slot().replace(guard);
        drop(previous);
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        let previous = self.slot().take();
        drop(previous);
    }

    /// Whether an action is scheduled or running.
    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|guard| !guard.is_finished())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<TaskGuard>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
