//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `DAVBRIDGE__`-prefixed environment variables.
//! Each sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod logging;
pub mod webdav;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::logging::LoggingConfig;
use self::webdav::WebDavConfig;

use crate::error::AppError;

pub use self::app::CorsConfig;
pub use self::webdav::WebDavTimeouts;

/// Environment variable holding the WebDAV container URL in legacy deployments.
pub const LEGACY_WEBDAV_URL_VAR: &str = "WEBDAV_URL";

/// Environment variable holding the shared bearer token in legacy deployments.
pub const LEGACY_TOKEN_VAR: &str = "TOKEN";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote WebDAV container settings.
    #[serde(default)]
    pub webdav: WebDavConfig,
    /// Bearer token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, the environment overlay
    /// `config/{env}.toml` and variables prefixed with `DAVBRIDGE__`.
    /// `WEBDAV_URL` and `TOKEN` are used when the corresponding keys are
    /// still empty afterwards.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DAVBRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.apply_legacy_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Fill empty `webdav.base_url` / `auth.token` from the legacy variables.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.webdav.base_url.trim().is_empty() {
            if let Some(url) = lookup(LEGACY_WEBDAV_URL_VAR) {
                self.webdav.base_url = url;
            }
        }

        if self.auth.token.is_empty() {
            if let Some(token) = lookup(LEGACY_TOKEN_VAR) {
                self.auth.token = token;
            }
        }
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.webdav.base_url.trim().is_empty() {
            return Err(AppError::configuration(
                "webdav.base_url is not set (DAVBRIDGE__WEBDAV__BASE_URL or WEBDAV_URL)",
            ));
        }

        if self.auth.token.is_empty() {
            return Err(AppError::configuration(
                "auth.token is not set (DAVBRIDGE__AUTH__TOKEN or TOKEN)",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const MINIMAL: &str = r#"
        [webdav]
        base_url = "https://dav.example.com/files"

        [auth]
        token = "secret"
    "#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.webdav.timeouts.connect_seconds, 10);
        assert_eq!(config.webdav.timeouts.upload_seconds, 300);
        assert!(config.auth.echo_expected_token);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9000

            [webdav]
            base_url = "http://localhost:8081/"
            username = "alice"
            password = "pw"

            [webdav.timeouts]
            delete_seconds = 5

            [auth]
            token = "t"
            echo_expected_token = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.webdav.username.as_deref(), Some("alice"));
        assert_eq!(config.webdav.timeouts.delete_seconds, 5);
        assert_eq!(config.webdav.timeouts.list_seconds, 30);
        assert!(!config.auth.echo_expected_token);
    }

    #[test]
    fn test_missing_base_url_is_rejected() {
        let err = AppConfig::from_toml_str("[auth]\ntoken = \"secret\"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("webdav.base_url"));
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err =
            AppConfig::from_toml_str("[webdav]\nbase_url = \"http://dav\"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("auth.token"));
    }

    #[test]
    fn test_legacy_env_fills_only_empty_values() {
        let mut config: AppConfig = serde_json::from_str("{}").unwrap();
        config.auth.token = "configured".to_string();

        config.apply_legacy_env(|key| match key {
            LEGACY_WEBDAV_URL_VAR => Some("https://legacy.example.com/dav".to_string()),
            LEGACY_TOKEN_VAR => Some("legacy-token".to_string()),
            _ => None,
        });

        assert_eq!(config.webdav.base_url, "https://legacy.example.com/dav");
        assert_eq!(config.auth.token, "configured");
        assert!(config.validate().is_ok());
    }
}
