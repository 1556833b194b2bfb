//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod console;
pub mod logging;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::console::ConsoleConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Record list and mutation settings.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `path` with an environment-specific overlay
    /// (`config/{env}.toml`) and environment variables prefixed with
    /// `TRAFFICWISE__`. Missing files fall back to built-in defaults.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TRAFFICWISE")
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

    /// Check every section's constraints.
    pub fn validate(&self) -> Result<(), AppError> {
        self.console.validate().map_err(|e| {
            AppError::configuration(format!("Invalid [console] section: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = AppConfig::load("config/does-not-exist", "nowhere").expect("load");
        assert_eq!(config.console.incident_page_size, 8);
        assert_eq!(config.console.escalation_handler, "Escalation Team");
        assert_eq!(config.logging.level, "info");
    }
}
