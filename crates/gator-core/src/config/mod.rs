//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file via the
//! `config` crate, overlaid with `GATOR__*` environment variables. Every
//! field has a default, so a missing file yields a working setup.

pub mod driver;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::driver::{DEFAULT_MAX_SEATS, DriverConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Batch driver settings.
    #[serde(default)]
    pub driver: DriverConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with `GATOR`
    /// and separated by `__` override file values, e.g.
    /// `GATOR__DRIVER__STOP_ON_PARSE_ERROR=true`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("GATOR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        tracing::debug!(path, "Configuration loaded");
        Ok(loaded)
    }
}
