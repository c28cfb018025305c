//! Logging initialization for the CLI.
//!
//! Logs go to stderr; stdout is reserved for the report. The level comes
//! from the config file unless `--verbose` or `RUST_LOG` overrides it, and
//! every batch request runs inside a span carrying its source URL so the
//! per-stage debug lines (executed command, timings) stay attributable when
//! requests are scripted back to back.

use renditor_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem from config plus CLI overrides.
pub fn init(config: &Config, verbose: bool, json_logs: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs || config.logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Span wrapping one batch request.
///
/// Entered for the whole generate command so the pipeline's stage logs and
/// the executed batch command line all carry the source URL.
pub fn request_span(image_url: &str) -> tracing::Span {
    tracing::info_span!("batch", image_url = %image_url)
}
