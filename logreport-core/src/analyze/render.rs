use crate::analyze::aggregation::AggregateState;
use crate::analyze::stats::DerivedStats;
use serde::Serialize;
use std::fmt;

const BAR_WIDTH: u64 = 40;

pub const SECTION_TITLES: [&str; 5] = [
    "Request Analysis",
    "IP Analysis",
    "Status Code Analysis",
    "Temporal Analysis",
    "Recommendations",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// The finished report. Sections are always the five of [`SECTION_TITLES`], in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}. {}", i + 1, section.title)?;
            writeln!(f, "{}", "=".repeat(section.title.len() + 3))?;
            for line in &section.lines {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

pub fn render_report(state: &AggregateState, stats: &DerivedStats) -> Report {
    Report {
        sections: vec![
            request_section(state, stats),
            ip_section(stats),
            status_section(stats),
            temporal_section(stats),
            recommendations_section(stats),
        ],
    }
}

fn request_section(state: &AggregateState, stats: &DerivedStats) -> ReportSection {
    let mut s = ReportSection::new(SECTION_TITLES[0]);

    s.line(format!("Total requests:   {}", state.total_requests));
    s.line(format!("GET requests:     {}", state.get_count));
    s.line(format!("POST requests:    {}", state.post_count));
    s.line(format!("Other methods:    {}", state.other_method_count));
    s.line(format!("Malformed lines:  {}", state.malformed_lines));
    s.line(format!("Failed requests:  {}", stats.failed_requests));
    s.line(format!(
        "Failure rate:     {}",
        stats
            .fail_percent
            .map(|p| format!("{p:.2}%"))
            .unwrap_or_else(|| "undefined".to_string())
    ));

    s
}

fn ip_section(stats: &DerivedStats) -> ReportSection {
    let mut s = ReportSection::new(SECTION_TITLES[1]);

    if stats.top_ips.is_empty() {
        s.line("<no IP entries>");
        return s;
    }

    s.line(format!("Top {} client IPs:", stats.top_ips.len()));
    for (ip, count) in &stats.top_ips {
        s.line(format!("  {ip:<40} {count:>8}"));
    }

    s
}

fn status_section(stats: &DerivedStats) -> ReportSection {
    let mut s = ReportSection::new(SECTION_TITLES[2]);

    if stats.status_distribution.is_empty() {
        s.line("<no status entries>");
        return s;
    }

    s.line("Status code distribution:");
    for (code, count) in &stats.status_distribution {
        s.line(format!("  {code:<6} {count:>8}"));
    }

    s
}

fn temporal_section(stats: &DerivedStats) -> ReportSection {
    let mut s = ReportSection::new(SECTION_TITLES[3]);

    match stats.peak_hour {
        Some((hour, count)) => {
            s.line(format!("Peak hour:        {hour:02}:00 ({count} requests)"))
        }
        None => s.line("Peak hour:        undefined"),
    }

    match stats.daily_average {
        Some(avg) => s.line(format!("Daily average:    {avg} requests/day")),
        None => s.line("Daily average:    undefined"),
    }

    s.line("");
    s.line("Requests by hour:");
    if stats.hourly_distribution.is_empty() {
        s.line("  <no hourly data>");
    } else {
        let peak = stats.peak_hour.map(|(_, c)| c).unwrap_or(0).max(1);
        for (hour, count) in &stats.hourly_distribution {
            let bars = (count * BAR_WIDTH / peak).max(1) as usize;
            s.line(format!("  {hour:02}:00 {:<40} {count:>8}", "█".repeat(bars)));
        }
    }

    s.line("");
    s.line("Days with most failures:");
    if stats.worst_failure_days.is_empty() {
        s.line("  <no failures recorded>");
    } else {
        for (day, failures) in &stats.worst_failure_days {
            s.line(format!("  {day:<12} {failures:>8}"));
        }
    }

    s
}

fn recommendations_section(stats: &DerivedStats) -> ReportSection {
    let mut s = ReportSection::new(SECTION_TITLES[4]);

    match stats.peak_hour {
        Some((hour, count)) => s.line(format!(
            "- Traffic peaks at {hour:02}:00 with {count} requests; schedule capacity and maintenance around it."
        )),
        None => s.line("- No hourly traffic data available to identify a peak hour."),
    }

    match stats.worst_failure_days.first() {
        Some((day, failures)) => s.line(format!(
            "- {day} had the most failed requests ({failures}); review server and application logs for that day."
        )),
        None => s.line("- No failed requests recorded; no failure day to investigate."),
    }

    s.line("- Monitor the top client IPs for abusive or automated traffic.");
    s.line("- Review 404 responses for broken links or missing resources.");
    s.line("- Consider caching frequently requested content to reduce server load.");

    s
}
