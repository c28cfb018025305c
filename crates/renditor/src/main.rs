//! Renditor CLI - batch crop/resize rendition generation.
//!
//! Renditor reads a crop-metadata document for a source image, expands its
//! crop regions against an ordered list of presets, runs one external batch
//! image pass for all outputs, and prints a reconciled report.
//!
//! # Usage
//!
//! ```bash
//! # Generate renditions with the configured default presets
//! renditor generate https://host/images/photo.jpg
//!
//! # Generate with explicit presets (applied in order)
//! renditor generate https://host/images/photo.jpg \
//!     --preset thumbnail,1,80,progressive --preset lanczos,1,60
//!
//! # List the available resize filters
//! renditor methods
//!
//! # View configuration
//! renditor config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Renditor - batch crop/resize rendition generation.
#[derive(Parser, Debug)]
#[command(name = "renditor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use a specific config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate renditions for a source image and print the report
    Generate(cli::generate::GenerateArgs),

    /// List the resize filters understood by the batch tool
    Methods,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match &cli.config {
        Some(path) => renditor_core::Config::load_from(path)?,
        None => match renditor_core::Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `renditor config path`."
                );
                renditor_core::Config::default()
            }
        },
    };
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Renditor v{}", renditor_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Generate(args) => cli::generate::execute(config, args),
        Commands::Methods => cli::methods::execute(),
        Commands::Config(args) => cli::config::execute(config, args),
    }
}
