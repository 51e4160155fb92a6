//! Configuration persistence.
//!
//! The bearer token and a minimal authenticated-user snapshot survive
//! restarts; collection caches never do and are rebuilt from the network
//! each session.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::session::AccountSnapshot;

/// Errors from loading or saving the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the platform API.
    pub base_url: String,

    /// Bearer token of the authenticated session, if logged in.
    #[serde(default)]
    pub token: Option<String>,

    /// Snapshot of the authenticated user, if logged in.
    #[serde(default)]
    pub account: Option<AccountSnapshot>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            token: None,
            account: None,
        }
    }
}

impl Config {
    /// Returns the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aries").join("config.json"))
    }

    /// Loads configuration from the default location, or defaults if absent.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine config directory");
                Self::default()
            }
        }
    }

    /// Loads configuration from `path`, falling back to defaults on any
    /// missing, unreadable, or unparsable file.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        tracing::debug!(?path, "Saved configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json"));

        assert_eq!(config.base_url, "http://127.0.0.1:8000/api");
        assert!(config.token.is_none());
        assert!(config.account.is_none());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            base_url: "https://aries.example.com/api".into(),
            token: Some("t0k3n".into()),
            account: None,
        };
        config.save_to(&path).unwrap();

        let restored = Config::load_from(&path);
        assert_eq!(restored.base_url, "https://aries.example.com/api");
        assert_eq!(restored.token.as_deref(), Some("t0k3n"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = Config::load_from(&path);
        assert!(config.token.is_none());
    }
}
