//! Per-line error type for dump ingestion

use std::fmt;

/// Error from parsing or extracting a single dump line.
///
/// Every variant is recoverable: the loader logs it, counts it and moves on
/// to the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Line has no JSON payload, or the payload is not well-formed.
    Malformed(String),
    /// A field needed downstream is absent or has the wrong shape.
    MissingField { field: String },
    /// `created.value` is present but does not match the timestamp layout.
    BadTimestamp { value: String, reason: String },
}

/// Coarse classification of a [`RecordError`] for counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipKind {
    Malformed,
    MissingField,
    BadTimestamp,
}

impl RecordError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn kind(&self) -> SkipKind {
        match self {
            Self::Malformed(_) => SkipKind::Malformed,
            Self::MissingField { .. } => SkipKind::MissingField,
            Self::BadTimestamp { .. } => SkipKind::BadTimestamp,
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed record: {msg}"),
            Self::MissingField { field } => write!(f, "missing required field `{field}`"),
            Self::BadTimestamp { value, reason } => {
                write!(f, "bad timestamp {value:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Malformed => "malformed",
            Self::MissingField => "missing field",
            Self::BadTimestamp => "bad timestamp",
        };
        f.write_str(label)
    }
}
