//! Source retrieval through the external curl binary.
//!
//! Retrieval is best-effort: a failed download is logged and reported to
//! the caller, but the request stays alive — a file already sitting at the
//! destination from an earlier request is just as good, and the metadata
//! read downstream is where a truly absent document fails the request.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{RetrievalConfig, ToolsConfig};
use crate::error::ExecError;

/// Downloads the source image and metadata document into the working
/// directory.
pub struct Retriever {
    curl: PathBuf,
    username: String,
    password: String,
}

impl Retriever {
    /// Create a retriever from the tool and retrieval settings.
    pub fn new(tools: &ToolsConfig, retrieval: &RetrievalConfig) -> Self {
        Self {
            curl: tools.curl.clone(),
            username: retrieval.username.clone(),
            password: retrieval.password.clone(),
        }
    }

    /// Fetch one URL to a local destination.
    ///
    /// Returns whether the download succeeded. A download failure is not an
    /// error; a curl binary that cannot be launched is.
    pub fn fetch(&self, url: &str, dest: &Path) -> Result<bool, ExecError> {
        let output = Command::new(&self.curl)
            .arg("-u")
            .arg(format!("{}:{}", self.username, self.password))
            .arg("-s")
            .arg("-f")
            .arg("-o")
            .arg(dest)
            .arg(url)
            .output()
            .map_err(|source| ExecError::Spawn {
                tool: self.curl.clone(),
                source,
            })?;

        if !output.status.success() {
            tracing::error!(
                "{} | while downloading {} -> {}",
                String::from_utf8_lossy(&output.stderr).trim(),
                url,
                dest.display()
            );
        }
        Ok(output.status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever(curl: &str) -> Retriever {
        let mut tools = ToolsConfig::default();
        tools.curl = PathBuf::from(curl);
        Retriever::new(&tools, &RetrievalConfig::default())
    }

    #[test]
    fn test_failed_download_is_tolerated() {
        let fetched = retriever("false")
            .fetch("https://host/images/photo.jpg", Path::new("/tmp/out.jpg"))
            .unwrap();
        assert!(!fetched);
    }

    #[test]
    fn test_successful_exit_reports_fetched() {
        let fetched = retriever("true")
            .fetch("https://host/images/photo.jpg", Path::new("/tmp/out.jpg"))
            .unwrap();
        assert!(fetched);
    }

    #[test]
    fn test_missing_curl_is_a_spawn_error() {
        let err = retriever("/nonexistent/curl")
            .fetch("https://host/images/photo.jpg", Path::new("/tmp/out.jpg"))
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
