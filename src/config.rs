use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::ViewMode;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON snapshot file the dashboard projects over
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Calendar view used when --mode is not given
    #[serde(default = "default_view_mode")]
    pub default_view: ViewMode,
    /// Maximum items rendered per calendar day before "+N more"
    #[serde(default = "default_day_cap")]
    pub day_cap: usize,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            default_view: default_view_mode(),
            day_cap: default_day_cap(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

// Default value functions
fn default_snapshot_path() -> String {
    // This is a fallback - actual profile will be determined at load time
    if let Some(data_dir) = utils::get_data_dir(utils::Profile::Prod) {
        data_dir.join("snapshot.json").to_string_lossy().to_string()
    } else {
        "~/.local/share/pmdash/snapshot.json".to_string()
    }
}

fn default_view_mode() -> ViewMode {
    ViewMode::Month
}

fn default_day_cap() -> usize {
    3
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from file, or create default if missing
    /// Uses the provided profile to determine config and snapshot paths
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            // Create default config and save it
            let mut config = Config::default();
            config.snapshot_path = Self::default_snapshot_path_for_profile(profile);
            config.save_with_profile(profile)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get default snapshot path for a specific profile
    fn default_snapshot_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("snapshot.json").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/pmdash-dev/snapshot.json".to_string(),
                utils::Profile::Prod => "~/.local/share/pmdash/snapshot.json".to_string(),
            }
        }
    }

    /// Get the expanded snapshot path (with ~ expansion)
    pub fn get_snapshot_path(&self) -> PathBuf {
        utils::expand_path(&self.snapshot_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("day_cap = 5").unwrap();
        assert_eq!(config.day_cap, 5);
        assert_eq!(config.default_view, ViewMode::Month);
        assert!(!config.snapshot_path.is_empty());
    }

    #[test]
    fn view_mode_round_trips_through_toml() {
        let mut config = Config::default();
        config.default_view = ViewMode::Week;
        let serialized = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(back.default_view, ViewMode::Week);
    }

    #[test]
    fn default_day_cap_is_three() {
        assert_eq!(Config::default().day_cap, 3);
    }
}
