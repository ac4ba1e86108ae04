use crate::conf::{CONFIG_FILE, LogreportConfig, load_config};
use anyhow::{Context, Result};
use clap::Subcommand;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config directory
        #[arg(default_value = "config")]
        path: PathBuf,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path, json, yaml } => dump(path, yaml && !json),
    }
}

pub fn check(path: PathBuf) -> Result<()> {
    let cfg = load_config(&path)
        .with_context(|| format!("{} {}", "✘".red(), path.join(CONFIG_FILE).display()))?;

    println!("{}", check_summary(&cfg));
    Ok(())
}

fn check_summary(cfg: &LogreportConfig) -> String {
    let ok = "✔".green().to_string();
    let mut lines = vec![
        format!("{ok} Config loaded successfully"),
        format!("{ok} top {} IPs", cfg.report.top_ips),
        format!("{ok} top {} failure days", cfg.report.worst_failure_days),
        format!("{ok} percent base: {:?}", cfg.report.percent_base),
    ];

    match cfg.report.parallel_chunk_lines {
        Some(n) => lines.push(format!("{ok} parallel aggregation, {n} lines per chunk")),
        None => lines.push(format!("{ok} sequential aggregation")),
    }

    lines.push(format!(
        "{ok} reports go to {} as {:?}",
        cfg.output.dir.display(),
        cfg.output.format
    ));

    lines.join("\n")
}

/// JSON unless `yaml` is set; `--json` only spells out the default.
pub fn dump(path: PathBuf, yaml: bool) -> Result<()> {
    let cfg = load_config(&path)?;

    if yaml {
        dump_yaml(&cfg)
    } else {
        dump_json(&cfg)
    }
}

fn dump_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
