//! Application configuration schemas.
//!
//! Configuration is deserialized via the `config` crate from an optional
//! TOML file overlaid with `RESQ__`-prefixed environment variables.
//! Consumers receive resolved structs and never read sources themselves.

pub mod auth;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::auth::{AuthConfig, KdfConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "RESQ";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential and session-token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables use `__` as the section
    /// separator, e.g. `RESQ__AUTH__JWT_SECRET` or `RESQ__AUTH__KDF__MEMORY_KIB`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
