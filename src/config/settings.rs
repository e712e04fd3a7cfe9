//! Configuration settings for plankr.
//!
//! Settings are loaded from `~/.plankr/config.yaml`. Platform credentials
//! can also come from the environment (`PLANKR_URL`, `PLANKR_API_KEY`,
//! `PLANKR_TOKEN`, `PLANKR_USER`, `PLANKR_NAME`), which wins over the
//! file; that keeps secrets out of dotfiles for people who prefer it.

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::PlankrError;
use crate::features::timer::Mode;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Hosted platform connection.
    pub platform: PlatformConfig,
    /// Timer defaults.
    pub timer: TimerConfig,
    /// History display settings.
    pub history: HistoryConfig,
}

/// Hosted platform connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL of the hosted platform project.
    pub url: Option<String>,
    /// Project API key sent with every request.
    pub api_key: Option<String>,
    /// Bearer token identifying this user.
    pub access_token: Option<String>,
    /// Platform user id (uuid).
    pub user_id: Option<String>,
    /// Name shown on leaderboards.
    pub display_name: Option<String>,
}

/// Timer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Default timing direction.
    #[serde(default = "default_mode")]
    pub default_mode: Mode,
    /// Default count-down target in seconds.
    #[serde(default = "default_target_seconds")]
    pub default_target_seconds: u32,
}

/// History display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many recent planks to show by default.
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

// Default value functions for serde
const fn default_mode() -> Mode {
    Mode::CountUp
}

const fn default_target_seconds() -> u32 {
    60
}

const fn default_history_limit() -> u32 {
    10
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_mode: default_mode(),
            default_target_seconds: default_target_seconds(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, applying environment
    /// overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, PlankrError> {
        let paths = Paths::new()?;
        let mut config = Self::load_from_path(&paths.config_file)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific path, without environment
    /// overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PlankrError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PlankrError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PlankrError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), PlankrError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PlankrError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PlankrError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PlankrError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Apply platform overrides from an environment-style lookup.
    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = get("PLANKR_URL") {
            self.platform.url = Some(url);
        }
        if let Some(key) = get("PLANKR_API_KEY") {
            self.platform.api_key = Some(key);
        }
        if let Some(token) = get("PLANKR_TOKEN") {
            self.platform.access_token = Some(token);
        }
        if let Some(user) = get("PLANKR_USER") {
            self.platform.user_id = Some(user);
        }
        if let Some(name) = get("PLANKR_NAME") {
            self.platform.display_name = Some(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.default_mode, Mode::CountUp);
        assert_eq!(config.timer.default_target_seconds, 60);
        assert_eq!(config.history.limit, 10);
        assert!(config.platform.url.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.history.limit, 10);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.platform.url = Some("https://example.supabase.co".to_string());
        config.timer.default_target_seconds = 120;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(
            loaded.platform.url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(loaded.timer.default_target_seconds, 120);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        // Write a partial config (only some fields)
        let partial_yaml = r"
timer:
  default_mode: count-down
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        // Custom value should be loaded
        assert_eq!(config.timer.default_mode, Mode::CountDown);
        // Defaults should be used for missing fields
        assert_eq!(config.timer.default_target_seconds, 60);
        assert_eq!(config.history.limit, 10);
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config = Config::default();
        config.platform.url = Some("https://file.example".to_string());

        config.apply_overrides(|name| match name {
            "PLANKR_URL" => Some("https://env.example".to_string()),
            "PLANKR_USER" => Some("u-42".to_string()),
            _ => None,
        });

        assert_eq!(config.platform.url.as_deref(), Some("https://env.example"));
        assert_eq!(config.platform.user_id.as_deref(), Some("u-42"));
        assert!(config.platform.api_key.is_none());
    }
}
