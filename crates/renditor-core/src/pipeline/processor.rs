//! Pipeline orchestration - one linear pass per batch request.
//!
//! Stages run strictly in sequence: locate, retrieve, parse, plan, execute,
//! reconcile. Nothing re-enters an earlier stage, and the single external
//! batch invocation is the only blocking point.

use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::preset::Preset;
use crate::source::SourceLocator;
use crate::types::BatchReport;

use super::executor::BatchExecutor;
use super::metadata::MetadataParser;
use super::plan::PlanBuilder;
use super::reconcile::Reconciler;
use super::retrieve::Retriever;

/// The main pipeline: turns one source image and its crop metadata into a
/// reconciled batch of renditions.
pub struct RenditionPipeline {
    config: Config,
}

impl RenditionPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one batch request end to end.
    ///
    /// Fails fast on an unusable source URL, an unreadable or malformed
    /// metadata document, an unlaunchable external tool, or a failed batch
    /// run. Per-entry metadata problems and per-artifact misses are
    /// tolerated inside their stages.
    pub fn run(&self, image_url: &str, presets: &[Preset]) -> PipelineResult<BatchReport> {
        let start = Instant::now();
        let source = SourceLocator::new(
            image_url,
            &self.config.workdir(),
            &self.config.retrieval.metadata_suffix,
        )?;
        tracing::debug!("working directory: {}", source.base_dir.display());

        std::fs::create_dir_all(&source.base_dir).map_err(|err| PipelineError::Workdir {
            path: source.base_dir.clone(),
            source: err,
        })?;

        // Best-effort: files left by an earlier request keep us usable
        let retriever = Retriever::new(&self.config.tools, &self.config.retrieval);
        retriever.fetch(&source.image_url, &source.image_path)?;
        retriever.fetch(&source.metadata_url, &source.metadata_path)?;

        let document = std::fs::read_to_string(&source.metadata_path).map_err(|err| {
            PipelineError::MetadataRead {
                path: source.metadata_path.clone(),
                source: err,
            }
        })?;
        let document =
            serde_json::from_str(&document).map_err(|err| PipelineError::MetadataParse {
                path: source.metadata_path.clone(),
                source: err,
            })?;

        let regions = MetadataParser::parse(&document);
        tracing::debug!("{} croppable regions in {}", regions.len(), source.metadata_url);

        let builder = PlanBuilder::new(
            &source,
            &self.config.general.public_prefix,
            &self.config.retrieval.rendition_suffix,
        );
        let mut plan = builder.build(&regions, presets);

        if plan.is_empty() {
            tracing::debug!("empty plan for {}; batch tool not invoked", image_url);
            return Ok(BatchReport {
                image_url: image_url.to_string(),
                took_ms: 0,
                groups: plan.groups,
            });
        }

        let executor = BatchExecutor::new(&self.config.tools.batch);
        let outcome = executor.run(&source.image_path, &plan)?;
        if !outcome.success() {
            return Err(PipelineError::BatchFailed {
                status: outcome.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&outcome.stderr).into_owned(),
            });
        }

        Reconciler::annotate(&mut plan);

        let report = BatchReport {
            image_url: image_url.to_string(),
            took_ms: outcome.took.as_millis() as u64,
            groups: plan.groups,
        };
        tracing::debug!(
            "batch for {} done in {:?}: {} groups",
            image_url,
            start.elapsed(),
            report.groups.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::ResizeMethod;
    use std::path::PathBuf;

    const IMAGE_URL: &str = "https://host/images/photo.jpg";

    /// Config with a temp workdir, a no-op batch tool, and a curl that
    /// always fails (so pre-placed files are all the pipeline sees).
    fn test_config(workdir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.general.workdir = workdir.to_path_buf();
        config.tools.batch = PathBuf::from("true");
        config.tools.curl = PathBuf::from("false");
        config
    }

    fn presets() -> Vec<Preset> {
        vec![
            Preset {
                resize_method: ResizeMethod::Thumbnail,
                blur: 0.0,
                quality: 80,
                progressive: false,
            },
            Preset {
                resize_method: ResizeMethod::Catrom,
                blur: 1.0,
                quality: 60,
                progressive: true,
            },
        ]
    }

    fn place_metadata(workdir: &std::path::Path, body: &str) {
        let base = workdir.join("host/images/photo.jpg");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("original.json"), body).unwrap();
        std::fs::write(base.join("original.jpg"), b"\xff\xd8\xff").unwrap();
    }

    const ONE_REGION: &str = r#"{
        "thumb": {
            "shouldCrop": true,
            "cropX": 0, "cropY": 0,
            "cropWidth": 100, "cropHeight": 100,
            "width": 50, "height": 50
        }
    }"#;

    #[test]
    fn test_rejects_extensionless_url_before_any_work() {
        let dir = tempfile::TempDir::new().unwrap();
        let pipeline = RenditionPipeline::new(test_config(dir.path()));

        let err = pipeline
            .run("https://host/images/photo", &presets())
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidImageUrl(_)));
        // Nothing was created for the rejected request
        assert!(!dir.path().join("host").exists());
    }

    #[test]
    fn test_failed_retrieval_with_preplaced_files_succeeds() {
        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(dir.path(), ONE_REGION);

        let pipeline = RenditionPipeline::new(test_config(dir.path()));
        let report = pipeline.run(IMAGE_URL, &presets()).unwrap();

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].renditions.len(), 2);
        // The no-op batch tool produced nothing, so sizes stay absent
        assert!(report.groups[0].renditions.iter().all(|r| r.size_kib.is_none()));
    }

    #[test]
    fn test_missing_metadata_document_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let pipeline = RenditionPipeline::new(test_config(dir.path()));

        let err = pipeline.run(IMAGE_URL, &presets()).unwrap_err();
        assert!(matches!(err, PipelineError::MetadataRead { .. }));
    }

    #[test]
    fn test_malformed_metadata_document_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(dir.path(), "{not json");

        let pipeline = RenditionPipeline::new(test_config(dir.path()));
        let err = pipeline.run(IMAGE_URL, &presets()).unwrap_err();
        assert!(matches!(err, PipelineError::MetadataParse { .. }));
    }

    #[test]
    fn test_unflagged_document_yields_empty_report_without_invoking_tool() {
        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(
            dir.path(),
            r#"{"thumb": {"shouldCrop": false, "cropX": 0, "cropY": 0,
                "cropWidth": 100, "cropHeight": 100, "width": 50, "height": 50}}"#,
        );

        // A batch tool that would fail loudly if it were invoked
        let mut config = test_config(dir.path());
        config.tools.batch = PathBuf::from("/nonexistent/batch-tool");

        let pipeline = RenditionPipeline::new(config);
        let report = pipeline.run(IMAGE_URL, &presets()).unwrap();
        assert!(report.groups.is_empty());
        assert_eq!(report.took_ms, 0);
    }

    #[test]
    fn test_batch_failure_carries_diagnostics_and_no_plan() {
        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(dir.path(), ONE_REGION);

        let mut config = test_config(dir.path());
        config.tools.batch = PathBuf::from("false");

        let pipeline = RenditionPipeline::new(config);
        let err = pipeline.run(IMAGE_URL, &presets()).unwrap_err();
        match err {
            PipelineError::BatchFailed { status, .. } => assert_ne!(status, 0),
            other => panic!("expected BatchFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_batch_failure_carries_stderr_verbatim() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(dir.path(), ONE_REGION);

        let tool = dir.path().join("failing-tool.sh");
        std::fs::write(&tool, "#!/bin/sh\necho 'decode failed: bad marker' >&2\nexit 3\n").unwrap();
        let mut perms = std::fs::metadata(&tool).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool, perms).unwrap();

        let mut config = test_config(dir.path());
        config.tools.batch = tool;

        let pipeline = RenditionPipeline::new(config);
        let err = pipeline.run(IMAGE_URL, &presets()).unwrap_err();
        match err {
            PipelineError::BatchFailed { status, stderr } => {
                assert_eq!(status, 3);
                assert_eq!(stderr, "decode failed: bad marker\n");
            }
            other => panic!("expected BatchFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_batch_tool_is_a_config_error_not_a_batch_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(dir.path(), ONE_REGION);

        let mut config = test_config(dir.path());
        config.tools.batch = PathBuf::from("/nonexistent/batch-tool");

        let pipeline = RenditionPipeline::new(config);
        let err = pipeline.run(IMAGE_URL, &presets()).unwrap_err();
        assert!(matches!(err, PipelineError::Exec(_)));
    }

    #[test]
    fn test_repeated_requests_resolve_identical_paths_and_pick_up_artifacts() {
        let dir = tempfile::TempDir::new().unwrap();
        place_metadata(dir.path(), ONE_REGION);

        let pipeline = RenditionPipeline::new(test_config(dir.path()));
        let first = pipeline.run(IMAGE_URL, &presets()).unwrap();

        // Simulate the batch tool having produced the first artifact
        let artifact = &first.groups[0].renditions[0].output_path;
        std::fs::write(artifact, vec![0u8; 2048]).unwrap();

        let second = pipeline.run(IMAGE_URL, &presets()).unwrap();
        assert_eq!(
            first.groups[0].renditions[0].output_path,
            second.groups[0].renditions[0].output_path
        );
        assert_eq!(second.groups[0].renditions[0].size_kib, Some(2));
        assert_eq!(second.groups[0].renditions[1].size_kib, None);
    }
}
