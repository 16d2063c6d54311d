//! Shelfload Core - Common infrastructure for dump ingestion pipelines
//!
//! This crate provides the pieces shared by every loader: the prefixed
//! line parser, plain/gzip dump readers, per-line error types, logging
//! and progress reporting.

pub mod dump;
pub mod error;
pub mod line;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use dump::{ByteCounter, DumpReader, open_dump};
pub use error::{RecordError, SkipKind};
pub use line::parse_line;
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num};
