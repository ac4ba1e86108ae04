use crate::analyze::analyze_reader;
use crate::conf::{OutputFormat, OutputSettings, load_config};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Access log file to analyze
    pub log_file: PathBuf,

    /// Path to config directory
    #[arg(long, default_value = "config")]
    pub config: PathBuf,

    /// Output format, overrides the configured one
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output path, use "-" for stdout. Defaults to a date-stamped file.
    #[arg(short = 'o', long)]
    pub output: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let cfg = load_config(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    let format = args.format.unwrap_or(cfg.output.format);

    let file = File::open(&args.log_file)
        .with_context(|| format!("failed to open log file {}", args.log_file.display()))?;

    tracing::info!(log_file = %args.log_file.display(), "analyzing access log");

    let analysis = analyze_reader(BufReader::new(file), &cfg.report)
        .with_context(|| format!("failed to read log file {}", args.log_file.display()))?;

    let content = match format {
        OutputFormat::Text => analysis.report.to_string(),
        OutputFormat::Json => analysis.to_json()?,
    };

    match args.output.as_deref() {
        Some("-") => print!("{content}"),
        Some(path) => write_report(Path::new(path), &content)?,
        None => {
            let path = report_path(&cfg.output, format, Local::now().naive_local());
            write_report(&path, &content)?;
        }
    }

    Ok(())
}

/// `<dir>/<prefix>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn report_path(output: &OutputSettings, format: OutputFormat, at: NaiveDateTime) -> PathBuf {
    output.dir.join(format!(
        "{}_{}.{}",
        output.file_prefix,
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");

    Ok(())
}
