//! Renditor Core - batch rendition planning and generation library.
//!
//! Renditor turns one source image plus a crop-metadata document into a
//! reconciled batch of cropped/resized renditions, delegating all pixel
//! work to a single invocation of an external batch image tool.
//!
//! # Architecture
//!
//! The pipeline is one linear pass per request, no stage re-entered:
//!
//! ```text
//! Metadata → CropRegions → Plan (regions × presets, sorted) → one batch run → sized report
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use renditor_core::{Config, RenditionPipeline};
//!
//! fn main() -> renditor_core::Result<()> {
//!     let config = Config::load()?;
//!     let pipeline = RenditionPipeline::new(config);
//!
//!     let presets = pipeline.config().presets.clone();
//!     let report = pipeline.run("https://host/images/photo.jpg", &presets)?;
//!     println!("{} rendition groups", report.groups.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod preset;
pub mod source;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ExecError, PipelineError, PipelineResult, RenditorError, Result};
pub use output::{OutputFormat, ReportWriter};
pub use pipeline::RenditionPipeline;
pub use preset::{ParsePresetError, Preset, ResizeMethod};
pub use source::SourceLocator;
pub use types::{BatchReport, CropRegion, Plan, Rendition, RenditionGroup};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_pipeline_holds_config() {
        let config = Config::default();
        let pipeline = RenditionPipeline::new(config);
        assert_eq!(pipeline.config().presets.len(), 2);
    }
}
