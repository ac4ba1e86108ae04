//! Access Log Analysis Pipeline
//!
//! Turns a combined-format access log into a five section report: request
//! volume, client IPs, status codes, traffic over time, and recommendations.
//!
//! Each raw line goes through the parser. A line that parses updates every
//! counter; a line that does not still counts toward the total, so a dirty log
//! inflates `total_requests` without touching the breakdowns. Once the input is
//! exhausted the summary values are derived in one go and rendered.
//!
//! The overall data processing architecture is:
//!
//! lines
//! parse_line
//! LogRecord
//! Aggregator
//! AggregateState
//! derive
//! DerivedStats
//! render_report
//! Report
//!

mod aggregation;
mod error;
mod parse;
mod render;
mod stats;
#[cfg(test)]
mod tests;
mod types;

pub use aggregation::{
    AggregateState, Aggregator, aggregate_lines, aggregate_parallel, aggregate_reader,
    for_each_line,
};
pub use error::{ParseError, StatsError};
pub use parse::{is_failure_code, is_failure_status, parse_line};
pub use render::{Report, ReportSection, SECTION_TITLES, render_report};
pub use stats::{
    DerivedStats, daily_average, derive, fail_percent, failed_requests, peak_hour, top_n,
};
pub use types::{LogRecord, Method};

use crate::conf::ReportSettings;
use serde::Serialize;
use std::io::{self, BufRead};

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub counts: AggregateState,
    pub stats: DerivedStats,
    pub report: Report,
}

impl Analysis {
    pub fn from_state(counts: AggregateState, settings: &ReportSettings) -> Self {
        let stats = derive(&counts, settings);
        let report = render_report(&counts, &stats);

        Self {
            counts,
            stats,
            report,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn analyze_lines<I, S>(lines: I, settings: &ReportSettings) -> Analysis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Analysis::from_state(aggregate_lines(lines), settings)
}

/// Reads `reader` to the end and analyzes it.
///
/// With `parallel_chunk_lines` set the whole input is buffered first and
/// aggregated in chunks; otherwise lines are aggregated as they are read.
pub fn analyze_reader<R: BufRead>(reader: R, settings: &ReportSettings) -> io::Result<Analysis> {
    let counts = match settings.parallel_chunk_lines {
        Some(chunk_lines) => {
            let mut lines = Vec::new();
            for_each_line(reader, |line| lines.push(line.to_string()))?;
            aggregate_parallel(&lines, chunk_lines)
        }
        None => aggregate_reader(reader)?,
    };

    if counts.total_requests > 0 && counts.malformed_lines * 2 > counts.total_requests {
        tracing::warn!(
            total = counts.total_requests,
            malformed = counts.malformed_lines,
            "more than half of the lines did not match the access log layout"
        );
    }

    Ok(Analysis::from_state(counts, settings))
}
