//! Error types for the Renditor batch pipeline.
//!
//! Errors are organized by stage. Request-level failures (bad source URL,
//! unreadable metadata, a failed batch run) abort the whole request; entry-
//! and artifact-level problems are tolerated inside their stage and never
//! surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Renditor operations.
#[derive(Error, Debug)]
pub enum RenditorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The source URL has no usable file extension (or is not a URL at all).
    /// Rejected before any filesystem or subprocess work.
    #[error("not a valid image url: {0}")]
    InvalidImageUrl(String),

    /// The working directory for the request could not be created
    #[error("Failed to create working directory {path}: {source}")]
    Workdir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The metadata document could not be read from disk
    #[error("Failed to read metadata document {path}: {source}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The metadata document is not valid JSON
    #[error("Failed to parse metadata document {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// An external tool could not be spawned at all
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// The batch tool ran to completion but reported failure.
    /// Carries the tool's diagnostic stream verbatim; no artifact from the
    /// run is guaranteed to exist.
    #[error("batch tool exited with status {status}: {stderr}")]
    BatchFailed { status: i32, stderr: String },
}

/// Failure to launch an external tool, as opposed to a tool that runs and
/// exits non-zero. A missing or unexecutable binary is a configuration
/// problem, not a processing outcome.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Failed to spawn {tool}: {source}")]
    Spawn {
        tool: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience type alias for Renditor results.
pub type Result<T> = std::result::Result<T, RenditorError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
