//! Configuration for the event manager and its logging.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! [manager]
//! max_listeners = 100
//!
//! [logging]
//! level = "debug"
//! json_format = false
//! ```

use crate::error::EventError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default maximum number of listeners for each event
pub const DEFAULT_MAX_LISTENERS: u32 = 100;

fn default_max_listeners() -> u32 {
    DEFAULT_MAX_LISTENERS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Event manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Upper bound (exclusive) for listener weights of a single event
    #[serde(default = "default_max_listeners")]
    pub max_listeners: u32,
}

impl ManagerConfig {
    /// Creates a config with the provided listener limit
    pub fn with_max_listeners(max_listeners: u32) -> Self {
        Self { max_listeners }
    }

    /// Checks the settings
    pub fn validate(&self) -> Result<(), EventError> {
        if self.max_listeners == 0 {
            return Err(EventError::InvalidConfiguration(
                "Could not set the maximum listeners: provided maximum is not a positive number"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output JSON instead of human-readable lines
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

/// Complete configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSystemConfig {
    #[serde(default)]
    pub manager: ManagerConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl EventSystemConfig {
    /// Parses and validates a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, EventError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| EventError::InvalidConfiguration(e.to_string()))?;
        config.manager.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EventError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        info!("📋 Loaded event system configuration from {}", path.display());
        Ok(config)
    }
}
