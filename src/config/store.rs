//! Config store for the client's local settings file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

/// Errors that can occur while reading or writing the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Locally persisted client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Voice key to re-select on startup when it is still in the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_voice: Option<String>,

    /// Simulated progress tick in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_interval_ms: Option<u64>,
}

impl ClientConfig {
    /// Validate values before they are written.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("'{url}' must start with http:// or https://"),
            });
        }

        if self.progress_interval_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "progress_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Reads and writes [`ClientConfig`] under a config directory.
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    /// Create a store in the default directory, `~/.tts-console-rs`.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".tts-console-rs");

        Ok(Self { config_dir })
    }

    /// Create a store in a custom directory.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the config file path.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Load the config, or defaults when no file exists yet.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let path = self.config_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let json = std::fs::read_to_string(&path)?;
        let config = serde_json::from_str(&json)?;

        Ok(config)
    }

    /// Validate and write the config.
    pub fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        config.validate()?;

        // Ensure directory exists
        std::fs::create_dir_all(&self.config_dir)?;

        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(self.config_path(), json)?;
        tracing::debug!(path = %self.config_path().display(), "config saved");

        Ok(())
    }

    /// Load, modify and save in one step.
    pub fn update<F>(&self, change: F) -> Result<ClientConfig, ConfigError>
    where
        F: FnOnce(&mut ClientConfig),
    {
        let mut config = self.load()?;
        change(&mut config);
        self.save(&config)?;
        Ok(config)
    }
}
