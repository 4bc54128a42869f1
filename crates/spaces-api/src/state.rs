//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use spaces_auth::{CredentialBridge, SessionDecoder};
use spaces_backend::BackendClient;
use spaces_core::config::AppConfig;
use spaces_core::result::AppResult;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Everything here is
/// read-only after startup; nothing about a request outlives it.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session cookie verifier
    pub sessions: Arc<SessionDecoder>,
    /// Session-to-backend credential bridge
    pub credentials: Arc<CredentialBridge>,
    /// Backend HTTP client
    pub backend: Arc<BackendClient>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let backend = BackendClient::new(&config.backend)?;

        Ok(Self {
            sessions: Arc::new(SessionDecoder::new(&config.session)),
            credentials: Arc::new(CredentialBridge::new(&config.backend)),
            backend: Arc::new(backend),
            config: Arc::new(config),
        })
    }
}
