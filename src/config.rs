//! Application configuration
//!
//! TOML config persisted under the user config directory. Loading is
//! load-or-default: a missing file yields the defaults, a malformed file is
//! an error the CLI surfaces.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::TimeWindow;
use crate::trackers::Tracker;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Default selections applied when CLI flags are omitted
    pub defaults: DefaultSettings,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Default selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Tracker assumed when --tracker is omitted
    pub tracker: Tracker,

    /// Window assumed when --window is omitted
    pub window: TimeWindow,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            metadata: ConfigMetadata {
                version: "1".to_string(),
                created_at: now,
                updated_at: now,
            },
            defaults: DefaultSettings {
                tracker: Tracker::Bmi,
                window: TimeWindow::Week,
            },
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitaltrend")
            .join("config.toml")
    }

    /// Load from a path, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Persist to a path, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let mut to_save = self.clone();
        to_save.metadata.updated_at = Utc::now();

        let contents =
            toml::to_string_pretty(&to_save).context("Failed to serialize configuration")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.defaults.window, TimeWindow::Week);
        assert_eq!(config.defaults.tracker, Tracker::Bmi);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.defaults.tracker = Tracker::Fluid;
        config.defaults.window = TimeWindow::Month;
        config.save(&path).unwrap();

        let reloaded = AppConfig::load(&path).unwrap();
        assert_eq!(reloaded.defaults.tracker, Tracker::Fluid);
        assert_eq!(reloaded.defaults.window, TimeWindow::Month);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "defaults = \"not a table\"").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}
