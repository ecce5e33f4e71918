//! Configuration module for shelfr
//!
//! Manages the catalog service endpoint and client tuning knobs.
//! Configuration is stored in the user's config directory.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

const fn default_timeout_ms() -> u64 {
    5000
}

const fn default_debounce_ms() -> u64 {
    300
}

fn default_admin_passphrase() -> String {
    "admin123".to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShelfrConfig {
    /// Root URL of the catalog service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout for store calls, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Quiet period after the last keystroke before a search fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Passphrase gating the admin affordances in the UI
    ///
    /// Compared client-side only; this flips visibility of edit/delete/add
    /// controls and is not an authentication mechanism.
    #[serde(default = "default_admin_passphrase")]
    pub admin_passphrase: String,
}

impl Default for ShelfrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            debounce_ms: default_debounce_ms(),
            admin_passphrase: default_admin_passphrase(),
        }
    }
}

impl ShelfrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("shelfr").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Debounce window as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShelfrConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_duration_accessors() {
        let config = ShelfrConfig {
            timeout_ms: 1200,
            debounce_ms: 250,
            ..ShelfrConfig::default()
        };

        assert_eq!(config.timeout(), Duration::from_millis(1200));
        assert_eq!(config.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ShelfrConfig {
            base_url: "http://books.local:8080".to_string(),
            timeout_ms: 750,
            debounce_ms: 100,
            admin_passphrase: "letmein".to_string(),
        };

        config.save_to(&path).unwrap();
        let loaded = ShelfrConfig::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://example.test\"\n").unwrap();

        let loaded = ShelfrConfig::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "http://example.test");
        assert_eq!(loaded.timeout_ms, 5000);
        assert_eq!(loaded.debounce_ms, 300);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(ShelfrConfig::load_from(&path).is_err());
    }
}
