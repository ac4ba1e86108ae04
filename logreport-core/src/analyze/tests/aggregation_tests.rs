use crate::analyze::tests::test_helpers::{line, sample_log};
use crate::analyze::{
    AggregateState, Aggregator, aggregate_lines, aggregate_parallel, aggregate_reader,
    analyze_reader,
};
use crate::conf::ReportSettings;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::io::Cursor;

#[test]
fn total_counts_every_line() {
    // Arrange
    let lines = sample_log();

    // Act
    let state = aggregate_lines(&lines);

    // Assert
    assert_eq!(state.total_requests, lines.len() as u64);
    assert_eq!(state.malformed_lines, 1);
}

#[test]
fn method_counts_cover_parsed_lines_only() {
    let state = aggregate_lines(sample_log());

    assert_eq!(state.get_count, 4);
    assert_eq!(state.post_count, 1);
    assert_eq!(state.other_method_count, 1);
    assert_eq!(
        state.get_count + state.post_count + state.other_method_count,
        state.total_requests - state.malformed_lines
    );
}

#[test]
fn breakdown_maps_are_filled() {
    let state = aggregate_lines(sample_log());

    assert_eq!(
        state.ip_counts,
        BTreeMap::from([
            ("10.0.0.1".to_string(), 3),
            ("10.0.0.2".to_string(), 2),
            ("10.0.0.3".to_string(), 1),
        ])
    );
    assert_eq!(
        state.status_counts,
        BTreeMap::from([(200, 1), (201, 1), (304, 1), (404, 2), (500, 1)])
    );
    assert_eq!(state.hour_counts, BTreeMap::from([(9, 2), (13, 3), (14, 1)]));
    assert_eq!(
        state.day_counts,
        BTreeMap::from([("10/Oct/2023".to_string(), 3), ("11/Oct/2023".to_string(), 3)])
    );
    assert_eq!(
        state.day_failure_counts,
        BTreeMap::from([("10/Oct/2023".to_string(), 2), ("11/Oct/2023".to_string(), 1)])
    );
}

#[test]
fn non_numeric_status_still_counts_toward_total() {
    // Arrange
    let mut agg = Aggregator::new();

    // Act
    agg.ingest(&line("1.1.1.1", "10/Oct/2023:10:00:00", "GET", "/", "abc"));

    // Assert
    let state = agg.state();
    assert_eq!(state.total_requests, 1);
    assert_eq!(state.malformed_lines, 1);
    assert_eq!(state.get_count, 0);
    assert!(state.status_counts.is_empty());
    assert!(state.ip_counts.is_empty());
}

#[test]
fn failed_record_counts_toward_its_ip_and_day() {
    // Arrange
    let mut agg = Aggregator::new();

    // Act
    agg.ingest(&line("9.9.9.9", "12/Oct/2023:08:00:00", "GET", "/", "503"));

    // Assert
    let state = agg.state();
    assert_eq!(state.ip_counts, BTreeMap::from([("9.9.9.9".to_string(), 1)]));
    assert_eq!(state.day_counts, BTreeMap::from([("12/Oct/2023".to_string(), 1)]));
    assert_eq!(
        state.day_failure_counts,
        BTreeMap::from([("12/Oct/2023".to_string(), 1)])
    );
}

#[test]
fn empty_input_leaves_everything_zero() {
    let state = aggregate_lines(Vec::<String>::new());

    assert_eq!(state, AggregateState::default());
}

#[test]
fn reader_and_iterator_agree() {
    // Arrange
    let text = sample_log().join("\n");

    // Act
    let from_reader = aggregate_reader(Cursor::new(text)).unwrap();
    let from_lines = aggregate_lines(sample_log());

    // Assert
    assert_eq!(from_reader, from_lines);
}

//-----------------------------------------------------------------------------
// Reading raw bytes
//-----------------------------------------------------------------------------
fn log_with_invalid_utf8() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(line("10.0.0.1", "10/Oct/2023:13:55:36", "GET", "/", "200").as_bytes());
    bytes.push(b'\n');
    bytes.extend_from_slice(b"10.0.0.2 - - [10/Oct/2023:13:56:00 +0000] \"GET /caf\xff\xfe HTTP/1.1\" 404 12");
    bytes.push(b'\n');
    bytes.extend_from_slice(line("10.0.0.3", "10/Oct/2023:14:00:00", "POST", "/", "500").as_bytes());
    bytes.push(b'\n');
    bytes
}

#[test]
fn invalid_utf8_does_not_abort_the_pass() {
    // Arrange
    let bytes = log_with_invalid_utf8();

    // Act
    let state = aggregate_reader(Cursor::new(bytes)).unwrap();

    // Assert
    assert_eq!(state.total_requests, 3);
    assert_eq!(state.malformed_lines, 0);
    assert_eq!(state.get_count, 2);
    assert_eq!(state.post_count, 1);
    assert_eq!(
        state.status_counts,
        BTreeMap::from([(200, 1), (404, 1), (500, 1)])
    );
}

#[test]
fn invalid_utf8_is_tolerated_by_chunked_analysis() {
    // Arrange
    let settings = ReportSettings {
        parallel_chunk_lines: Some(2),
        ..ReportSettings::default()
    };

    // Act
    let analysis = analyze_reader(Cursor::new(log_with_invalid_utf8()), &settings).unwrap();

    // Assert
    assert_eq!(analysis.counts.total_requests, 3);
    assert_eq!(
        analysis.counts,
        aggregate_reader(Cursor::new(log_with_invalid_utf8())).unwrap()
    );
}

#[test]
fn crlf_line_endings_are_stripped() {
    let text = sample_log().join("\r\n");

    let state = aggregate_reader(Cursor::new(text)).unwrap();

    assert_eq!(state, aggregate_lines(sample_log()));
}

#[test]
fn order_of_lines_does_not_matter() {
    let mut reversed = sample_log();
    reversed.reverse();

    assert_eq!(aggregate_lines(&reversed), aggregate_lines(sample_log()));
}

//-----------------------------------------------------------------------------
// Merging
//-----------------------------------------------------------------------------
#[test]
fn merge_of_any_split_matches_single_pass() {
    // Arrange
    let lines = sample_log();
    let whole = aggregate_lines(&lines);

    for split in 0..=lines.len() {
        // Act
        let mut left = aggregate_lines(&lines[..split]);
        left.merge(aggregate_lines(&lines[split..]));

        // Assert
        assert_eq!(left, whole, "split at {split}");
    }
}

#[test]
fn merge_is_commutative() {
    let lines = sample_log();
    let a = aggregate_lines(&lines[..3]);
    let b = aggregate_lines(&lines[3..]);

    let mut ab = a.clone();
    ab.merge(b.clone());
    let mut ba = b;
    ba.merge(a);

    assert_eq!(ab, ba);
}

#[test]
fn parallel_matches_sequential_for_every_chunk_size() {
    let lines = sample_log();
    let whole = aggregate_lines(&lines);

    for chunk in 1..=lines.len() + 1 {
        assert_eq!(aggregate_parallel(&lines, chunk), whole, "chunk size {chunk}");
    }
}

#[test]
fn parallel_on_empty_input() {
    let lines: Vec<String> = Vec::new();

    assert_eq!(aggregate_parallel(&lines, 4), AggregateState::default());
}
