//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the attendance-config.toml
//! file. It holds the event limits the selector enforces and the default log filter.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "attendance-config.toml";

/// Application configuration loaded from attendance-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Event window limits
    pub event: EventConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Event window limits
#[derive(Debug, Deserialize, Serialize)]
pub struct EventConfig {
    /// Longest event the organizer accepts, in days
    pub max_duration_days: i64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the config file
    File,
    /// No readable file, defaults used
    Missing,
    /// File present but rejected, defaults used
    Invalid(String),
}

impl ConfigSource {
    /// Report the outcome of reading `path`.
    pub fn log(&self, path: &Path) {
        match self {
            ConfigSource::File => tracing::info!(path = %path.display(), "loaded configuration"),
            ConfigSource::Missing => {
                tracing::info!(path = %path.display(), "no config file found, using defaults")
            }
            ConfigSource::Invalid(reason) => tracing::warn!(
                path = %path.display(),
                error = %reason,
                "invalid config file format, using defaults"
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            event: EventConfig {
                max_duration_days: 14,
            },
            logging: LoggingConfig {
                filter: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from attendance-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let (config, source) = Self::read_from_path(&path);
        source.log(path.as_ref());
        config
    }

    /// Read configuration without logging, reporting where it came from.
    ///
    /// Lets the binary read its log filter before a subscriber exists and
    /// report the outcome once one is installed.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> (Self, ConfigSource) {
        let contents = match fs::read_to_string(path.as_ref()) {
            Ok(contents) => contents,
            Err(_) => return (Self::default(), ConfigSource::Missing),
        };
        match toml::from_str::<Config>(&contents) {
            Ok(config) if config.event.max_duration_days < 1 => (
                Self::default(),
                ConfigSource::Invalid(format!(
                    "event.max_duration_days must be at least 1, got {}",
                    config.event.max_duration_days
                )),
            ),
            Ok(config) => (config, ConfigSource::File),
            Err(e) => (Self::default(), ConfigSource::Invalid(e.to_string())),
        }
    }

    /// Save configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        tracing::info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
