//! Configuration loading and management
//!
//! Handles parsing of the optional `config.toml` file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filter::Filter;

/// Name of the configuration file inside the platform config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Notification queue configuration
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Interactive view configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Persistent store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Data directory override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Storage key holding the task collection
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    "tasks".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_key(),
        }
    }
}

/// Notification queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Maximum number of notifications shown at once
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Milliseconds before a notification is dismissed
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_limit() -> usize {
    3
}

fn default_timeout_ms() -> u64 {
    4000
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Interactive view configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Filter selected when the view opens
    #[serde(default)]
    pub default_filter: Filter,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or return defaults when the file is missing
    pub fn load_or_default(path: &Path) -> crate::error::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the config path: explicit path, else the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "taskpad")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.store.validate()?;
        self.notifications.validate()?;
        Ok(())
    }
}

impl StoreConfig {
    fn validate(&self) -> crate::error::Result<()> {
        validate_key(&self.key)
    }
}

/// Check that a storage key can double as a file stem
pub fn validate_key(key: &str) -> crate::error::Result<()> {
    if key.trim().is_empty() {
        return Err(crate::error::Error::InvalidConfig(
            "store.key cannot be empty".to_string(),
        ));
    }
    if !key
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Err(crate::error::Error::InvalidConfig(format!(
            "store.key '{key}' must only contain letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}

impl NotificationsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.limit == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "notifications.limit must be >= 1".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "notifications.timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
