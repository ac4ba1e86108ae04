use crate::analyze::parse::parse_line;
use crate::analyze::types::{LogRecord, Method};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, BufRead};

/// Counters accumulated over one full pass of the input.
///
/// `total_requests` counts every line fed in, parsed or not. Every other
/// counter only sees successfully parsed lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateState {
    pub total_requests: u64,
    pub get_count: u64,
    pub post_count: u64,
    pub other_method_count: u64,
    pub malformed_lines: u64,

    pub ip_counts: BTreeMap<String, u64>,
    pub status_counts: BTreeMap<u16, u64>,
    pub hour_counts: BTreeMap<u8, u64>,
    pub day_counts: BTreeMap<String, u64>,
    pub day_failure_counts: BTreeMap<String, u64>,
}

impl AggregateState {
    pub fn parsed_lines(&self) -> u64 {
        self.total_requests - self.malformed_lines
    }

    /// Adds every counter of `other` into `self`.
    ///
    /// Commutative and associative, so chunked aggregation can merge in any
    /// order and still match a sequential pass.
    pub fn merge(&mut self, other: AggregateState) {
        self.total_requests += other.total_requests;
        self.get_count += other.get_count;
        self.post_count += other.post_count;
        self.other_method_count += other.other_method_count;
        self.malformed_lines += other.malformed_lines;

        merge_counts(&mut self.ip_counts, other.ip_counts);
        merge_counts(&mut self.status_counts, other.status_counts);
        merge_counts(&mut self.hour_counts, other.hour_counts);
        merge_counts(&mut self.day_counts, other.day_counts);
        merge_counts(&mut self.day_failure_counts, other.day_failure_counts);
    }
}

fn merge_counts<K: Ord>(into: &mut BTreeMap<K, u64>, from: BTreeMap<K, u64>) {
    for (key, count) in from {
        *into.entry(key).or_insert(0) += count;
    }
}

#[derive(Debug, Default)]
pub struct Aggregator {
    state: AggregateState,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw line. The line always counts toward the total.
    pub fn ingest(&mut self, line: &str) {
        self.state.total_requests += 1;

        match parse_line(line) {
            Ok(record) => self.record(record),
            Err(err) => {
                self.state.malformed_lines += 1;
                tracing::debug!(
                    line = self.state.total_requests,
                    error = %err,
                    "skipping malformed line"
                );
            }
        }
    }

    fn record(&mut self, record: LogRecord) {
        let failed = record.is_failure();
        let state = &mut self.state;

        match record.method {
            Method::Get => state.get_count += 1,
            Method::Post => state.post_count += 1,
            Method::Other(_) => state.other_method_count += 1,
        }

        *state.ip_counts.entry(record.client_ip).or_insert(0) += 1;
        *state.status_counts.entry(record.status).or_insert(0) += 1;
        *state.hour_counts.entry(record.hour).or_insert(0) += 1;

        if failed {
            *state
                .day_failure_counts
                .entry(record.day.clone())
                .or_insert(0) += 1;
        }
        *state.day_counts.entry(record.day).or_insert(0) += 1;
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    pub fn finish(self) -> AggregateState {
        self.state
    }
}

/// Calls `f` with every line of `reader`, without the trailing `\n` or `\r\n`.
///
/// Invalid UTF-8 is replaced with U+FFFD instead of failing, so a corrupt
/// byte only affects the line it sits on.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        f(&String::from_utf8_lossy(&buf));
    }
}

/// Single sequential pass over a reader. I/O errors abort the pass.
pub fn aggregate_reader<R: BufRead>(reader: R) -> io::Result<AggregateState> {
    let mut agg = Aggregator::new();

    for_each_line(reader, |line| agg.ingest(line))?;

    let state = agg.finish();
    tracing::info!(
        total = state.total_requests,
        malformed = state.malformed_lines,
        "aggregation pass complete"
    );

    Ok(state)
}

pub fn aggregate_lines<I, S>(lines: I) -> AggregateState
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut agg = Aggregator::new();
    for line in lines {
        agg.ingest(line.as_ref());
    }
    agg.finish()
}

/// Aggregates `chunk_lines`-sized slices on the rayon pool and merges them.
pub fn aggregate_parallel<S>(lines: &[S], chunk_lines: usize) -> AggregateState
where
    S: AsRef<str> + Sync,
{
    let chunk_lines = chunk_lines.max(1);

    let state = lines
        .par_chunks(chunk_lines)
        .map(|chunk| aggregate_lines(chunk.iter()))
        .reduce(AggregateState::default, |mut acc, chunk| {
            acc.merge(chunk);
            acc
        });

    tracing::info!(
        total = state.total_requests,
        malformed = state.malformed_lines,
        chunks = lines.len().div_ceil(chunk_lines),
        "parallel aggregation complete"
    );

    state
}
