//! Phase-level load errors

use std::fmt;
use std::path::PathBuf;

/// Error that aborts a whole load phase.
///
/// Per-line problems are [`shelfload_core::RecordError`]s and never surface
/// here.
#[derive(Debug)]
pub enum LoadError {
    /// Dump could not be opened, or a read failed mid-stream.
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A store upsert or lookup failed while handling `line_no`.
    Store {
        line_no: usize,
        source: anyhow::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { path, source } => {
                write!(f, "source unavailable: {}: {source}", path.display())
            }
            Self::Store { line_no, source } => {
                write!(f, "store error at line {line_no}: {source:#}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } => Some(source),
            Self::Store { source, .. } => Some(&**source),
        }
    }
}
