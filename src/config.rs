use crate::notifications::NotificationConfig;
use crate::theme::{Theme, THEME_NAMES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "storefront-notify";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unable to determine config directory")]
    NoConfigDir,
}

/// Application configuration persisted as `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: String,
    pub notifications: NotificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: "gruvbox-dark".to_string(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the default configuration file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Where the debug log goes when logging is enabled
    pub fn log_file_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_dir()
            .or_else(dirs::cache_dir)
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(data_dir.join(APP_DIR).join("storefront-notify.log"))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notifications.validate().map_err(ConfigError::Invalid)?;
        if Theme::by_name(&self.theme).is_none() {
            return Err(ConfigError::Invalid(format!(
                "Unknown theme '{}', expected one of: {}",
                self.theme,
                THEME_NAMES.join(", ")
            )));
        }
        Ok(())
    }

    /// Resolve the configured theme
    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.theme).unwrap_or_default()
    }
}
