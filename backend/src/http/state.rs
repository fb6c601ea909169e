//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::ephemeris::Ephemeris;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only ephemeris used for solar geometry
    pub ephemeris: Arc<dyn Ephemeris>,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state with the given ephemeris and configuration.
    pub fn new(ephemeris: Arc<dyn Ephemeris>, config: AppConfig) -> Self {
        Self {
            ephemeris,
            config: Arc::new(config),
        }
    }
}
