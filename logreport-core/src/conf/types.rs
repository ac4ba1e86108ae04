use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LogreportConfig {
    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReportSettings {
    /// Length of the top client IP list.
    pub top_ips: usize,

    /// Length of the worst failure day list.
    pub worst_failure_days: usize,

    /// Denominator used for the failure percentage.
    pub percent_base: PercentBase,

    /// When set, lines are aggregated in chunks of this size on a thread pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_chunk_lines: Option<usize>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_ips: 10,
            worst_failure_days: 5,
            percent_base: PercentBase::AllLines,
            parallel_chunk_lines: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PercentBase {
    /// Every line read, including malformed ones.
    #[default]
    AllLines,
    /// Only lines that parsed into a record.
    ParsedLines,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for date-stamped report files.
    pub dir: PathBuf,
    pub file_prefix: String,
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_prefix: "log_analysis".to_string(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}
