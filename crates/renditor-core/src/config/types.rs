//! Sub-configuration structs with defaults matching the original service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Root of the per-request working directories
    pub workdir: PathBuf,

    /// Public-serving prefix mirrored into every rendition's public URL
    pub public_prefix: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("~/.renditor/tmp"),
            public_prefix: "/thumbnails".to_string(),
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// The multi-output batch image tool
    pub batch: PathBuf,

    /// The retrieval binary
    pub curl: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            batch: PathBuf::from("gm_thumbnails"),
            curl: PathBuf::from("curl"),
        }
    }
}

/// Source retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Basic-auth username passed to the retrieval tool
    pub username: String,

    /// Basic-auth password passed to the retrieval tool
    pub password: String,

    /// Appended to the image URL to address its renditions document
    pub metadata_suffix: String,

    /// Appended to the image URL to address one named rendition (provenance)
    pub rendition_suffix: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
            metadata_suffix: "/jcr:content/renditions.-1.json".to_string(),
            rendition_suffix: "/jcr:content/renditions".to_string(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
