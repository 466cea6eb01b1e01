//! Shared state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::provider::Providers;
use crate::wizard::Controller;

/// Shared application state.
///
/// Cheap to clone; handlers receive a copy per request.
#[derive(Clone)]
pub struct WebState {
    /// Owner of the configuration and the poll
    pub controller: Arc<Controller>,

    /// Direct provider access for the proxy endpoints
    pub providers: Providers,

    /// How often the monitor page reloads itself
    pub refresh: Duration,
}

impl WebState {
    pub fn new(controller: Controller, providers: Providers, refresh: Duration) -> Self {
        Self {
            controller: Arc::new(controller),
            providers,
            refresh,
        }
    }
}
