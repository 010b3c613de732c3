//! TOML-based application configuration.
//!
//! Stores the countdown recurrence interval and notification preferences.
//! Configuration is stored at `~/.config/taskly/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::storage::data_dir;

/// Countdown recurrence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Recurrence interval in seconds. The reference build uses 10 seconds
    /// as a stand-in for a real recurrence interval.
    #[serde(default = "default_frequency_secs")]
    pub frequency_secs: u64,
    /// Reminder notification title.
    #[serde(default = "default_title")]
    pub title: String,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/taskly/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_frequency_secs() -> u64 {
    10
}
fn default_title() -> String {
    "The thing is due!".into()
}
fn default_true() -> bool {
    true
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            frequency_secs: default_frequency_secs(),
            title: default_title(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl CountdownConfig {
    /// Recurrence interval in milliseconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn frequency_ms(&self) -> i64 {
        i64::try_from(self.frequency_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000)
    }
}

impl Config {
    /// Path of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::DataDir(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.countdown.frequency_secs, 10);
        assert_eq!(parsed.countdown.title, "The thing is due!");
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.countdown.frequency_secs, 10);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn frequency_converts_to_millis() {
        let cfg = CountdownConfig {
            frequency_secs: 90,
            title: String::new(),
        };
        assert_eq!(cfg.frequency_ms(), 90_000);
    }

    #[test]
    fn huge_frequency_saturates() {
        let cfg = CountdownConfig {
            frequency_secs: u64::MAX,
            title: String::new(),
        };
        assert_eq!(cfg.frequency_ms(), i64::MAX);
    }
}
