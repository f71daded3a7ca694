//! Shared application state for the Tally server.

use tally_core::config::TallyConfig;
use tally_core::SessionRegistry;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. There is no process-wide menu: every test or server builds
/// its own.
#[derive(Debug, Default)]
pub struct AppState {
    /// All sessions and their menus.
    pub registry: SessionRegistry,
}

impl AppState {
    /// Create state with an empty registry and default token length.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state from loaded configuration.
    pub fn from_config(config: &TallyConfig) -> Self {
        Self {
            registry: SessionRegistry::with_token_length(config.sessions.token_length),
        }
    }
}
