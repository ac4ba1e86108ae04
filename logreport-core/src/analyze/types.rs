use crate::analyze::parse::is_failure_code;
use std::fmt;

/// HTTP request method as it appears in the request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(m) => m,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successfully parsed access-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub client_ip: String,
    pub method: Method,
    pub status: u16,
    /// 0-23
    pub hour: u8,
    /// Calendar day exactly as written in the timestamp, e.g. `10/Oct/2023`.
    pub day: String,
}

impl LogRecord {
    pub fn is_failure(&self) -> bool {
        is_failure_code(self.status)
    }
}
