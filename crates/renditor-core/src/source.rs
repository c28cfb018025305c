//! Source image locator: URL validation and working-directory derivation.
//!
//! Everything here is computed before any filesystem or subprocess work, so
//! an unusable URL rejects the request up front. The derived directory is a
//! pure function of the URL's host and path; repeated requests against the
//! same source land in the same directory and reuse whatever is already
//! there.

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::PipelineError;

/// Locations derived from one source-image URL.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    /// The source image URL as given
    pub image_url: String,

    /// Where the crop-metadata document is fetched from
    pub metadata_url: String,

    /// The source's file extension, without the dot
    pub ext: String,

    /// `host[:port]/path` — the deterministic working-directory key
    pub relative_path: String,

    /// Per-request working directory under the configured workdir
    pub base_dir: PathBuf,

    /// Local path of the retrieved source image
    pub image_path: PathBuf,

    /// Local path of the retrieved metadata document
    pub metadata_path: PathBuf,
}

impl SourceLocator {
    /// Derive all request paths from the image URL.
    ///
    /// Fails with [`PipelineError::InvalidImageUrl`] when the URL does not
    /// parse, has no host, or its path carries no file extension — without
    /// an extension there is no way to name the output artifacts.
    pub fn new(
        image_url: &str,
        workdir: &Path,
        metadata_suffix: &str,
    ) -> Result<Self, PipelineError> {
        let invalid = || PipelineError::InvalidImageUrl(image_url.to_string());

        let parsed = Url::parse(image_url).map_err(|_| invalid())?;
        let host = parsed.host_str().ok_or_else(invalid)?;

        let ext = Path::new(parsed.path())
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .ok_or_else(invalid)?
            .to_string();

        // The port participates in the directory key, like a netloc
        let netloc = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let relative_path = format!("{netloc}/{}", parsed.path().trim_start_matches('/'));

        let base_dir = workdir.join(&relative_path);
        let image_path = base_dir.join(format!("original.{ext}"));
        let metadata_path = base_dir.join("original.json");
        let metadata_url = format!("{image_url}{metadata_suffix}");

        Ok(Self {
            image_url: image_url.to_string(),
            metadata_url,
            ext,
            relative_path,
            base_dir,
            image_path,
            metadata_path,
        })
    }
}
