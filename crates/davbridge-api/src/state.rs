//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use davbridge_core::config::AppConfig;
use davbridge_storage::WebDavClient;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Both fields are
/// immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Client for the remote WebDAV container
    pub webdav: Arc<WebDavClient>,
}

impl AppState {
    pub fn new(config: AppConfig, webdav: WebDavClient) -> Self {
        Self {
            config: Arc::new(config),
            webdav: Arc::new(webdav),
        }
    }
}
