//! The `renditor generate` command: run one batch request.

use clap::Args;
use renditor_core::{Config, OutputFormat, Preset, RenditionPipeline, ReportWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source image URL (its path must end in a file extension)
    #[arg(required = true)]
    pub image_url: String,

    /// Preset as `method,blur,quality[,progressive]`; repeatable, applied
    /// in order. Falls back to the configured presets when omitted.
    #[arg(short, long = "preset", value_name = "SPEC")]
    pub presets: Vec<String>,

    /// Output file for the report (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format: json or jsonl
    #[arg(short, long)]
    pub format: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the generate command.
pub fn execute(config: Config, args: GenerateArgs) -> anyhow::Result<()> {
    let presets = resolve_presets(&config, &args.presets)?;

    let format_name = args.format.as_deref().unwrap_or(&config.output.format);
    let format = OutputFormat::parse(format_name)
        .ok_or_else(|| anyhow::anyhow!("unknown output format: {format_name}"))?;
    let pretty = args.pretty || config.output.pretty;

    let pipeline = RenditionPipeline::new(config);

    // Every stage log inside the run carries the source URL
    let _request = crate::logging::request_span(&args.image_url).entered();
    let report = pipeline.run(&args.image_url, &presets)?;

    tracing::info!(
        groups = report.groups.len(),
        outputs = report
            .groups
            .iter()
            .map(|g| g.renditions.len())
            .sum::<usize>(),
        took_ms = report.took_ms,
        "batch complete"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = ReportWriter::new(BufWriter::new(file), format, pretty);
            writer.write(&report)?;
            writer.flush()?;
            tracing::info!("report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = ReportWriter::new(stdout.lock(), format, pretty);
            writer.write(&report)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// CLI presets win over configured defaults; having neither is an error.
fn resolve_presets(config: &Config, cli_presets: &[String]) -> anyhow::Result<Vec<Preset>> {
    let presets = if cli_presets.is_empty() {
        config.presets.clone()
    } else {
        cli_presets
            .iter()
            .map(|spec| spec.parse::<Preset>())
            .collect::<Result<Vec<_>, _>>()?
    };

    anyhow::ensure!(
        !presets.is_empty(),
        "no presets configured; pass --preset or add [[presets]] to the config file"
    );
    Ok(presets)
}
