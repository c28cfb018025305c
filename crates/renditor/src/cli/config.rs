//! The `renditor config` command for configuration management.

use clap::{Args, Subcommand};
use renditor_core::{Config, Preset};

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Summarize the active configuration: tools, retrieval, presets
    Show {
        /// Dump the full configuration as TOML instead
        #[arg(long)]
        toml: bool,
    },

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(config: Config, args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { toml } => {
            if toml {
                print!("{}", config.to_toml()?);
            } else {
                print!("{}", summarize(&config));
            }
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&path, Config::default().to_toml()?)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// The sections that decide what a batch request actually does. The
/// retrieval password is deliberately left out.
fn summarize(config: &Config) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Working directory: {}\n\
         Public prefix:     {}\n\n",
        config.workdir().display(),
        config.general.public_prefix
    ));

    out.push_str(&format!(
        "Batch tool: {}\n\
         Retrieval:  {} (as {})\n\
         \x20 metadata suffix:  {}\n\
         \x20 rendition suffix: {}\n\n",
        config.tools.batch.display(),
        config.tools.curl.display(),
        config.retrieval.username,
        config.retrieval.metadata_suffix,
        config.retrieval.rendition_suffix
    ));

    if config.presets.is_empty() {
        out.push_str("No default presets; every request must pass --preset.\n");
    } else {
        out.push_str("Default presets (applied in order):\n");
        for (i, preset) in config.presets.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, preset_line(preset)));
        }
    }
    out
}

fn preset_line(preset: &Preset) -> String {
    format!(
        "{} blur={} quality={}{}",
        preset.resize_method,
        preset.blur,
        preset.quality,
        if preset.progressive { " progressive" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_numbers_presets_from_one() {
        let summary = summarize(&Config::default());
        assert!(summary.contains("  1. Thumbnail blur=1 quality=80 progressive"));
        assert!(summary.contains("  2. Lanczos blur=1 quality=60"));
    }

    #[test]
    fn test_summary_omits_password() {
        let mut config = Config::default();
        config.retrieval.password = "s3cret".to_string();
        assert!(!summarize(&config).contains("s3cret"));
    }

    #[test]
    fn test_summary_without_presets_points_at_flag() {
        let mut config = Config::default();
        config.presets.clear();
        assert!(summarize(&config).contains("--preset"));
    }
}
