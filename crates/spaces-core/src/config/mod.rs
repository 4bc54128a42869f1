//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus environment variables. Each sub-module
//! represents a logical configuration section.

pub mod app;
pub mod backend;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::backend::{BackendConfig, CredentialFormat};
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Environment variable that selects the backend origin.
pub const BACKEND_URL_ENV: &str = "JAVA_API_URL";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `SPACES__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend service settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml`, environment
    /// variables prefixed with `SPACES__`, and finally `JAVA_API_URL`.
    /// Every source is optional; missing keys fall back to defaults.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Like [`AppConfig::load`] but with an explicit base file (without
    /// extension). The environment overlay is looked up next to it.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let overlay = match base.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{env}"),
            None => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix("SPACES")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("backend.url", std::env::var(BACKEND_URL_ENV).ok())
            .map_err(|e| AppError::configuration(format!("Failed to apply {BACKEND_URL_ENV}: {e}")))?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would make the gateway unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.backend.url.trim().is_empty() {
            return Err(AppError::configuration("backend.url must not be empty"));
        }
        if self.session.secret.is_empty() {
            return Err(AppError::configuration("session.secret must not be empty"));
        }
        if self.backend.credential == CredentialFormat::Signed
            && self.backend.credential_secret.is_empty()
        {
            return Err(AppError::configuration(
                "backend.credential_secret is required for signed credentials",
            ));
        }
        Ok(())
    }
}
