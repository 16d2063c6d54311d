//! Two-phase load orchestration: authors, then works

use std::time::{Duration, Instant};

use shelfload_core::{ProgressContext, fmt_num};
use shelfload_store::{AuthorStore, BookStore};

use crate::authors::load_authors;
use crate::config::LoadConfig;
use crate::error::LoadError;
use crate::stats::PhaseStats;
use crate::works::load_works;

/// How one phase ended
#[derive(Debug)]
pub enum PhaseOutcome {
    Completed(PhaseStats),
    Failed(LoadError),
    /// Skipped because an earlier phase failed under `strict_phases`
    NotRun,
}

impl PhaseOutcome {
    pub fn stats(&self) -> Option<&PhaseStats> {
        match self {
            Self::Completed(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    fn label(&self) -> String {
        match self {
            Self::Completed(stats) => format!(
                "{} records, {} skipped",
                fmt_num(stats.records_written),
                fmt_num(stats.total_skipped())
            ),
            Self::Failed(e) => format!("failed: {e}"),
            Self::NotRun => "not run".to_string(),
        }
    }
}

/// Run the author phase, then the work phase, against the given stores.
///
/// Phase failures are logged and reported in the summary, never returned.
/// The work phase still runs after a failed author phase unless
/// `config.strict_phases` is set.
pub fn run<A, B>(
    config: &LoadConfig,
    authors: &A,
    books: &B,
    progress: &ProgressContext,
) -> RunSummary
where
    A: AuthorStore + ?Sized,
    B: BookStore + ?Sized,
{
    let start = Instant::now();

    let pb = progress.phase_bar("authors");
    let author_phase = match load_authors(&config.authors_dump, authors, &pb) {
        Ok(stats) => {
            stats.log();
            log::info!("authors loaded");
            PhaseOutcome::Completed(stats)
        }
        Err(e) => {
            log::error!("author phase failed: {e}");
            PhaseOutcome::Failed(e)
        }
    };

    let work_phase = if config.strict_phases && !author_phase.is_completed() {
        log::warn!("skipping work phase: author phase did not complete");
        PhaseOutcome::NotRun
    } else {
        let pb = progress.phase_bar("works");
        match load_works(&config.works_dump, &config.works, authors, books, &pb) {
            Ok(stats) => {
                stats.log();
                log::info!("works loaded");
                PhaseOutcome::Completed(stats)
            }
            Err(e) => {
                log::error!("work phase failed: {e}");
                PhaseOutcome::Failed(e)
            }
        }
    };

    let summary = RunSummary {
        authors: author_phase,
        works: work_phase,
        elapsed: start.elapsed(),
    };
    summary.log();
    summary
}

/// Summary of a load run
#[derive(Debug)]
pub struct RunSummary {
    pub authors: PhaseOutcome,
    pub works: PhaseOutcome,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.authors.is_completed() && self.works.is_completed()
    }

    pub fn log(&self) {
        log::info!("=== Load Summary ===");
        log::info!("Authors: {}", self.authors.label());
        log::info!("Works: {}", self.works.label());
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Phase;

    #[test]
    fn summary_success_requires_both_phases() {
        let summary = RunSummary {
            authors: PhaseOutcome::Completed(PhaseStats::new(Phase::Authors)),
            works: PhaseOutcome::NotRun,
            elapsed: Duration::ZERO,
        };
        assert!(!summary.is_success());
        assert!(summary.authors.stats().is_some());
        assert!(summary.works.stats().is_none());
    }

    #[test]
    fn summary_log_does_not_panic() {
        let summary = RunSummary {
            authors: PhaseOutcome::Failed(LoadError::SourceUnavailable {
                path: "missing.txt".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            }),
            works: PhaseOutcome::Completed(PhaseStats::new(Phase::Works)),
            elapsed: Duration::from_millis(1500),
        };
        summary.log();
        assert!(summary.authors.label().starts_with("failed"));
    }
}
