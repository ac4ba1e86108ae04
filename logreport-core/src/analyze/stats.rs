use crate::analyze::aggregation::AggregateState;
use crate::analyze::error::StatsError;
use crate::analyze::parse::is_failure_code;
use crate::conf::{PercentBase, ReportSettings};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary values computed once from a finished aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    pub failed_requests: u64,
    /// `None` when the denominator is zero.
    pub fail_percent: Option<f64>,
    pub top_ips: Vec<(String, u64)>,
    pub status_distribution: Vec<(u16, u64)>,
    pub hourly_distribution: BTreeMap<u8, u64>,
    /// `None` when no day was observed.
    pub daily_average: Option<u64>,
    pub worst_failure_days: Vec<(String, u64)>,
    pub peak_hour: Option<(u8, u64)>,
}

pub fn derive(state: &AggregateState, settings: &ReportSettings) -> DerivedStats {
    let fail_percent = fail_percent(state, settings.percent_base);
    let daily_average = daily_average(state);

    if let Err(err) = fail_percent {
        tracing::warn!(error = %err, "failure percentage is undefined");
    }
    if let Err(err) = daily_average {
        tracing::warn!(error = %err, "daily average is undefined");
    }

    DerivedStats {
        failed_requests: failed_requests(state),
        fail_percent: fail_percent.ok(),
        top_ips: top_n(&state.ip_counts, settings.top_ips),
        status_distribution: top_n(&state.status_counts, usize::MAX),
        hourly_distribution: state.hour_counts.clone(),
        daily_average: daily_average.ok(),
        worst_failure_days: top_n(&state.day_failure_counts, settings.worst_failure_days),
        peak_hour: peak_hour(state),
    }
}

pub fn failed_requests(state: &AggregateState) -> u64 {
    state
        .status_counts
        .iter()
        .filter(|(code, _)| is_failure_code(**code))
        .map(|(_, count)| count)
        .sum()
}

pub fn fail_percent(state: &AggregateState, base: PercentBase) -> Result<f64, StatsError> {
    let denominator = match base {
        PercentBase::AllLines => state.total_requests,
        PercentBase::ParsedLines => state.parsed_lines(),
    };

    if denominator == 0 {
        return Err(StatsError::EmptyInput);
    }

    let pct = failed_requests(state) as f64 / denominator as f64 * 100.0;
    Ok(round2(pct))
}

pub fn daily_average(state: &AggregateState) -> Result<u64, StatsError> {
    if state.total_requests == 0 {
        return Err(StatsError::EmptyInput);
    }

    let days = state.day_counts.len() as u64;
    if days == 0 {
        return Err(StatsError::NoDistinctDays);
    }

    let total: u64 = state.day_counts.values().sum();
    Ok(total / days)
}

/// Highest count wins; ties go to the lowest hour.
pub fn peak_hour(state: &AggregateState) -> Option<(u8, u64)> {
    state
        .hour_counts
        .iter()
        .fold(None, |best, (hour, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((*hour, *count)),
        })
}

/// Sorts by count descending, ties by ascending key, and keeps at most `n`.
pub fn top_n<K: Ord + Clone>(counts: &BTreeMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.iter().map(|(k, c)| (k.clone(), *c)).collect();

    // BTreeMap iteration is already key-ascending, so a stable sort on count
    // leaves equal counts in key order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
