use crate::analyze::error::ParseError;
use crate::analyze::types::{LogRecord, Method};
use chrono::{NaiveDateTime, Timelike};

/// Position of the status field in a whitespace split of a combined-format line:
/// `ip - - [ts zone] "METHOD path proto" status size`
const STATUS_FIELD: usize = 8;

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Returns true when the status token is a three digit `4xx` or `5xx` code.
pub fn is_failure_status(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 3
        && matches!(bytes[0], b'4' | b'5')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
}

/// Parsed-code form of [`is_failure_status`]: a `u16` printed as three digits
/// starting with 4 or 5 is exactly the 400-599 range.
pub fn is_failure_code(code: u16) -> bool {
    (400..=599).contains(&code)
}

pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let client_ip = fields
        .first()
        .ok_or(ParseError::MissingField("client ip"))?
        .to_string();

    let method = parse_method(line)?;
    let status_token = fields
        .get(STATUS_FIELD)
        .ok_or(ParseError::MissingField("status"))?;
    let status = parse_status(status_token)?;
    let (day, hour) = parse_timestamp(line)?;

    Ok(LogRecord {
        client_ip,
        method,
        status,
        hour,
        day,
    })
}

fn parse_method(line: &str) -> Result<Method, ParseError> {
    let (_, request) = line
        .split_once('"')
        .ok_or(ParseError::MissingField("request"))?;

    let token = request
        .split(|c: char| c.is_whitespace() || c == '"')
        .next()
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingField("method"))?;

    Ok(Method::from_token(token))
}

/// Status codes are exactly three digits. `0500` or `5000` are not codes, so
/// the parsed value always prints back as the original token.
fn parse_status(token: &str) -> Result<u16, ParseError> {
    if token.len() != 3 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidStatus(token.to_string()));
    }

    token
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidStatus(token.to_string()))
}

/// Extracts `(day, hour)` from the bracketed `[10/Oct/2023:13:55:36 +0000]` field.
fn parse_timestamp(line: &str) -> Result<(String, u8), ParseError> {
    let start = line.find('[').ok_or(ParseError::MissingField("timestamp"))?;
    let rest = &line[start + 1..];
    let end = rest.find(']').ok_or(ParseError::MissingField("timestamp"))?;
    let raw = &rest[..end];

    // Zone offset is optional and does not affect the bucket.
    let stamp = raw.split_whitespace().next().unwrap_or_default();

    let parsed = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::InvalidTimestamp(raw.to_string()))?;

    let (day, _) = stamp
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidTimestamp(raw.to_string()))?;

    Ok((day.to_string(), parsed.hour() as u8))
}
