//! Debounced capacity tracking.
//!
//! Resize and orientation events arrive in bursts. Inputs are recorded
//! immediately, but the row capacity is only recomputed once they have been
//! quiet for the debounce delay.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::board::{Viewport, compute_max_entries};
use crate::domain::Theme;
use crate::timer::Debouncer;

/// Everything capacity depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityInputs {
    pub theme: Theme,
    pub is_fullscreen: bool,
    pub viewport: Viewport,
}

impl CapacityInputs {
    pub fn max_entries(&self) -> usize {
        compute_max_entries(self.theme, self.is_fullscreen, self.viewport)
    }
}

/// Tracks capacity inputs and publishes the debounced row capacity.
#[derive(Debug)]
pub struct ViewportTracker {
    inputs: watch::Sender<CapacityInputs>,
    capacity: Arc<watch::Sender<usize>>,
    debouncer: Debouncer,
}

impl ViewportTracker {
    /// Start from `initial`, with its capacity computed immediately.
    pub fn new(initial: CapacityInputs, delay: Duration) -> Self {
        let (inputs, _) = watch::channel(initial);
        let (capacity, _) = watch::channel(initial.max_entries());
        Self {
            inputs,
            capacity: Arc::new(capacity),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Latest recorded inputs, possibly not yet reflected in capacity.
    pub fn inputs(&self) -> CapacityInputs {
        *self.inputs.borrow()
    }

    /// Current row capacity.
    pub fn capacity(&self) -> usize {
        *self.capacity.borrow()
    }

    /// Record a new viewport size.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.update(|inputs| inputs.viewport = viewport);
    }

    /// Record a theme or fullscreen change.
    pub fn set_display(&self, theme: Theme, is_fullscreen: bool) {
        self.update(|inputs| {
            inputs.theme = theme;
            inputs.is_fullscreen = is_fullscreen;
        });
    }

    fn update(&self, change: impl FnOnce(&mut CapacityInputs)) {
        let mut next = self.inputs();
        change(&mut next);
        if next == self.inputs() {
            return;
        }
        self.inputs.send_replace(next);

        let capacity = self.capacity.clone();
        self.debouncer.call(async move {
            let max_entries = next.max_entries();
            let previous = capacity.send_replace(max_entries);
            if previous != max_entries {
                tracing::debug!(previous, max_entries, "capacity changed");
            }
        });
    }

    /// Drop any pending recomputation.
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }
}
