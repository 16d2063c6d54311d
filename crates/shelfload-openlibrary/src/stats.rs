//! Per-phase load statistics

use std::fmt;
use std::time::Duration;

use shelfload_core::{RecordError, SkipKind, fmt_num};

/// Maximum skipped lines kept verbatim in [`PhaseStats::skipped`].
pub const MAX_RECORDED_SKIPS: usize = 100;

/// Load phases, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Authors,
    Works,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Authors => "authors",
            Self::Works => "works",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A line that was skipped, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_no: usize,
    pub error: RecordError,
}

/// Counters from one load phase
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: Phase,
    pub lines_read: usize,
    pub records_written: usize,
    /// Works dropped because the gating array was absent
    pub filtered: usize,
    pub malformed: usize,
    pub missing_field: usize,
    pub bad_timestamp: usize,
    /// First [`MAX_RECORDED_SKIPS`] skipped lines
    pub skipped: Vec<SkippedLine>,
    pub elapsed: Duration,
}

impl PhaseStats {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            lines_read: 0,
            records_written: 0,
            filtered: 0,
            malformed: 0,
            missing_field: 0,
            bad_timestamp: 0,
            skipped: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Count a skipped line and keep it if the sample is not full yet.
    pub fn record_skip(&mut self, line_no: usize, error: RecordError) {
        match error.kind() {
            SkipKind::Malformed => self.malformed += 1,
            SkipKind::MissingField => self.missing_field += 1,
            SkipKind::BadTimestamp => self.bad_timestamp += 1,
        }
        if self.skipped.len() < MAX_RECORDED_SKIPS {
            self.skipped.push(SkippedLine { line_no, error });
        }
    }

    pub fn skipped_count(&self, kind: SkipKind) -> usize {
        match kind {
            SkipKind::Malformed => self.malformed,
            SkipKind::MissingField => self.missing_field,
            SkipKind::BadTimestamp => self.bad_timestamp,
        }
    }

    pub fn total_skipped(&self) -> usize {
        self.malformed + self.missing_field + self.bad_timestamp
    }

    /// Log stats for non-TTY output
    pub fn log(&self) {
        log::info!(
            "{}: {} records from {} lines ({} skipped, {} filtered) in {:.1}s",
            self.phase,
            fmt_num(self.records_written),
            fmt_num(self.lines_read),
            fmt_num(self.total_skipped()),
            fmt_num(self.filtered),
            self.elapsed.as_secs_f64()
        );
        if self.total_skipped() > 0 {
            log::info!(
                "{}: skipped {} malformed, {} missing field, {} bad timestamp",
                self.phase,
                self.malformed,
                self.missing_field,
                self.bad_timestamp
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_skip_counts_by_kind() {
        let mut stats = PhaseStats::new(Phase::Works);
        stats.record_skip(1, RecordError::malformed("x"));
        stats.record_skip(2, RecordError::missing("created.value"));
        stats.record_skip(
            3,
            RecordError::BadTimestamp {
                value: "nope".into(),
                reason: "layout".into(),
            },
        );
        stats.record_skip(4, RecordError::malformed("y"));

        assert_eq!(stats.skipped_count(SkipKind::Malformed), 2);
        assert_eq!(stats.skipped_count(SkipKind::MissingField), 1);
        assert_eq!(stats.skipped_count(SkipKind::BadTimestamp), 1);
        assert_eq!(stats.total_skipped(), 4);
        assert_eq!(stats.skipped[1].line_no, 2);
    }

    #[test]
    fn skip_sample_is_bounded() {
        let mut stats = PhaseStats::new(Phase::Authors);
        for i in 0..MAX_RECORDED_SKIPS + 25 {
            stats.record_skip(i + 1, RecordError::malformed("bad"));
        }
        assert_eq!(stats.malformed, MAX_RECORDED_SKIPS + 25);
        assert_eq!(stats.skipped.len(), MAX_RECORDED_SKIPS);
    }

    #[test]
    fn log_does_not_panic() {
        let mut stats = PhaseStats::new(Phase::Authors);
        stats.lines_read = 10;
        stats.records_written = 9;
        stats.record_skip(3, RecordError::malformed("x"));
        stats.log();
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Authors.to_string(), "authors");
        assert_eq!(Phase::Works.to_string(), "works");
    }
}
