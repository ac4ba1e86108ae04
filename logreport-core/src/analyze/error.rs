use thiserror::Error;

/// Why a single line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("non-numeric status '{0}'")]
    InvalidStatus(String),

    #[error("malformed timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Derived metrics that have no defined value for the aggregated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no lines were processed")]
    EmptyInput,

    #[error("no line carried a parseable day")]
    NoDistinctDays,
}
