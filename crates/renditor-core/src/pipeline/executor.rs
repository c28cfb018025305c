//! Single-invocation batch execution of the full plan.
//!
//! The whole plan goes to the external tool as one command line: the source
//! image first, then a `-f <geometry> -o <output>` pair per rendition in
//! plan order. One invocation lets the tool decode the source once for all
//! outputs, which dominates run time for large sources.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use crate::error::ExecError;
use crate::types::Plan;

/// Outcome of one batch-tool invocation.
///
/// A non-zero status is a normal outcome here; interpreting it is the
/// caller's job, and after a non-zero exit no output artifact is guaranteed
/// to exist. Only a failure to launch the tool at all is an error.
#[derive(Debug)]
pub struct ExecOutcome {
    /// The tool's exit status
    pub status: std::process::ExitStatus,

    /// Captured standard output, complete
    pub stdout: Vec<u8>,

    /// Captured standard error, complete
    pub stderr: Vec<u8>,

    /// Wall-clock duration of the invocation
    pub took: Duration,
}

impl ExecOutcome {
    /// Whether the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs the external batch tool over a sorted plan.
pub struct BatchExecutor {
    tool: PathBuf,
}

impl BatchExecutor {
    /// Create an executor for the given tool path.
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    /// Build the full argument list: source image first, then one
    /// `-f <geometry> -o <output>` pair per rendition in plan order.
    pub fn build_args(image_path: &Path, plan: &Plan) -> Vec<OsString> {
        let mut args = Vec::with_capacity(1 + plan.rendition_count() * 4);
        args.push(image_path.as_os_str().to_os_string());
        for rendition in plan.renditions() {
            args.push("-f".into());
            args.push(rendition.geometry.clone().into());
            args.push("-o".into());
            args.push(rendition.output_path.as_os_str().to_os_string());
        }
        args
    }

    /// Run the tool synchronously, capturing both streams in full.
    ///
    /// Blocks until the tool exits; there is no timeout.
    pub fn run(&self, image_path: &Path, plan: &Plan) -> Result<ExecOutcome, ExecError> {
        let args = Self::build_args(image_path, plan);
        tracing::debug!(
            "exec: {} {}",
            self.tool.display(),
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let start = Instant::now();
        let output = Command::new(&self.tool)
            .args(&args)
            .output()
            .map_err(|source| ExecError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;
        let took = start.elapsed();

        tracing::debug!(
            "batch tool finished: {} in {:?} ({} outputs requested)",
            output.status,
            took,
            plan.rendition_count()
        );

        Ok(ExecOutcome {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
            took,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::ResizeMethod;
    use crate::types::{Rendition, RenditionGroup};

    fn plan_with(geometries: &[&str]) -> Plan {
        Plan {
            groups: vec![RenditionGroup {
                source_name: "thumb".to_string(),
                source_area: 2500,
                renditions: geometries
                    .iter()
                    .map(|g| Rendition {
                        geometry: g.to_string(),
                        output_path: PathBuf::from(format!("/out/{g}.jpg")),
                        public_url: format!("/thumbnails/{g}.jpg"),
                        source_rendition_url: "https://host/img.jpg/r/thumb".to_string(),
                        resize_method: ResizeMethod::Thumbnail,
                        blur: 1.0,
                        quality: 80,
                        progressive: false,
                        size_kib: None,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_build_args_pairs_in_plan_order() {
        let plan = plan_with(&["spec-a", "spec-b"]);
        let args = BatchExecutor::build_args(Path::new("/in/original.jpg"), &plan);

        let rendered: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            rendered,
            vec![
                "/in/original.jpg",
                "-f",
                "spec-a",
                "-o",
                "/out/spec-a.jpg",
                "-f",
                "spec-b",
                "-o",
                "/out/spec-b.jpg",
            ]
        );
    }

    #[test]
    fn test_build_args_empty_plan_is_bare_source() {
        let plan = Plan::default();
        let args = BatchExecutor::build_args(Path::new("/in/original.jpg"), &plan);
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_zero_exit_is_success() {
        let executor = BatchExecutor::new("true");
        let outcome = executor
            .run(Path::new("/in/original.jpg"), &plan_with(&["s"]))
            .unwrap();
        assert!(outcome.success());
    }

    #[test]
    fn test_nonzero_exit_is_an_outcome_not_an_error() {
        let executor = BatchExecutor::new("false");
        let outcome = executor
            .run(Path::new("/in/original.jpg"), &plan_with(&["s"]))
            .unwrap();
        assert!(!outcome.success());
    }

    #[test]
    fn test_missing_tool_is_a_spawn_error() {
        let executor = BatchExecutor::new("/nonexistent/renditor-batch-tool");
        let err = executor
            .run(Path::new("/in/original.jpg"), &plan_with(&["s"]))
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
        assert!(err.to_string().contains("renditor-batch-tool"));
    }
}
