//! Shared line loop for both load phases

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;
use shelfload_core::progress::upgrade_to_bar;
use shelfload_core::{RecordError, fmt_num, open_dump};

use crate::error::LoadError;
use crate::stats::{Phase, PhaseStats};

/// Initial capacity for the per-line read buffer
const LINE_BUF_CAPACITY: usize = 4096;

/// Progress update interval (every N lines to avoid overhead)
const UPDATE_INTERVAL: usize = 10_000;

/// Skipped lines logged at `warn` per phase before dropping to `debug`
const WARN_SKIPS: usize = 10;

/// What the per-line handler did with a line
pub(crate) enum Outcome {
    Written,
    /// Valid record intentionally not stored
    Filtered,
}

/// Per-line handler failure
pub(crate) enum LineError {
    /// Bad line; skip it and continue
    Record(RecordError),
    /// Store failure; abort the phase
    Store(anyhow::Error),
}

impl From<RecordError> for LineError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

/// Stream `path` line by line through `handle`, reading at most `limit` lines.
///
/// The dump is closed when this returns, on every path.
pub(crate) fn scan_dump(
    phase: Phase,
    path: &Path,
    limit: Option<usize>,
    pb: &ProgressBar,
    mut handle: impl FnMut(&str) -> Result<Outcome, LineError>,
) -> Result<PhaseStats, LoadError> {
    let start = Instant::now();
    let unavailable = |source: std::io::Error| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = open_dump(path).map_err(unavailable)?;
    if let Some(total) = reader.total_bytes() {
        upgrade_to_bar(pb, total);
    }
    pb.set_message("loading...");
    log::info!(
        "{phase}: reading {}{}",
        path.display(),
        if reader.is_compressed() { " (gzip)" } else { "" }
    );

    let mut stats = PhaseStats::new(phase);
    let mut buf = Vec::with_capacity(LINE_BUF_CAPACITY);

    loop {
        if limit.is_some_and(|max| stats.lines_read >= max) {
            log::debug!("{phase}: line limit {} reached", stats.lines_read);
            break;
        }
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(unavailable)? == 0 {
            break;
        }
        stats.lines_read += 1;
        let line_no = stats.lines_read;

        let result = match std::str::from_utf8(&buf) {
            Ok(line) => handle(line),
            Err(e) => Err(RecordError::malformed(format!("invalid UTF-8: {e}")).into()),
        };

        match result {
            Ok(Outcome::Written) => stats.records_written += 1,
            Ok(Outcome::Filtered) => stats.filtered += 1,
            Err(LineError::Record(err)) => {
                if stats.total_skipped() < WARN_SKIPS {
                    log::warn!("{phase}: skipping line {line_no}: {err}");
                } else {
                    log::debug!("{phase}: skipping line {line_no}: {err}");
                }
                stats.record_skip(line_no, err);
            }
            Err(LineError::Store(source)) => {
                pb.abandon_with_message("store error");
                return Err(LoadError::Store { line_no, source });
            }
        }

        if line_no % UPDATE_INTERVAL == 0 {
            pb.set_position(reader.bytes_read());
            pb.set_message(format!("{} records", fmt_num(stats.records_written)));
        }
    }

    pb.set_position(reader.bytes_read());
    pb.finish_and_clear();
    stats.elapsed = start.elapsed();
    Ok(stats)
}
