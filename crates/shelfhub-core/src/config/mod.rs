//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files plus `SHELFHUB__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SHELFHUB__`, then validates
    /// the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SHELFHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (SHELFHUB__AUTH__JWT_SECRET)",
            ));
        }
        if self.auth.access_token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.access_token_ttl_minutes must be greater than zero",
            ));
        }
        if self.auth.refresh_token_ttl_days == 0 {
            return Err(AppError::configuration(
                "auth.refresh_token_ttl_days must be greater than zero",
            ));
        }
        if self.database.url.is_empty() {
            return Err(AppError::configuration("database.url must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::app::Platform;
    use super::*;
    use crate::error::ErrorKind;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let cfg = from_toml(
            r#"
            [auth]
            jwt_secret = "s3cret"
            "#,
        );
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.platform, Platform::Prod);
        assert_eq!(cfg.auth.access_token_ttl_minutes, 60);
        assert_eq!(cfg.auth.refresh_token_ttl_days, 60);
        assert_eq!(cfg.auth.access_cookie_name, "accessToken");
        assert_eq!(cfg.auth.refresh_cookie_name, "refreshToken");
        assert!(cfg.auth.secure_cookies);
        assert_eq!(cfg.logging.format, "pretty");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_platform_parses_lowercase() {
        let cfg = from_toml(
            r#"
            [server]
            platform = "dev"
            [auth]
            jwt_secret = "s3cret"
            "#,
        );
        assert!(cfg.server.platform.is_dev());
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let cfg = AppConfig::default();
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = "s3cret".into();
        cfg.auth.refresh_token_ttl_days = 0;
        assert!(cfg.validate().is_err());
    }
}
