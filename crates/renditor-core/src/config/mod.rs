//! Configuration management for Renditor.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults; every section tolerates partial TOML via `#[serde(default)]`.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::preset::{Preset, ResizeMethod};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Renditor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// External tool locations
    pub tools: ToolsConfig,

    /// Source retrieval settings
    pub retrieval: RetrievalConfig,

    /// Default presets, applied in order when a request supplies none
    pub presets: Vec<Preset>,

    /// Report output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            tools: ToolsConfig::default(),
            retrieval: RetrievalConfig::default(),
            presets: default_presets(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// The two-preset default mirroring the classic small/large thumbnail pair.
fn default_presets() -> Vec<Preset> {
    vec![
        Preset {
            resize_method: ResizeMethod::Thumbnail,
            blur: 1.0,
            quality: 80,
            progressive: true,
        },
        Preset {
            resize_method: ResizeMethod::Lanczos,
            blur: 1.0,
            quality: 60,
            progressive: false,
        },
    ]
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// ~/.renditor/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "renditor", "renditor")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".renditor").join("config.toml")
            })
    }

    /// Get the resolved working directory (with ~ expansion).
    pub fn workdir(&self) -> PathBuf {
        let path_str = self.general.workdir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
