//! Work phase: works dump → BookStore, with author names resolved

use std::path::Path;

use indicatif::ProgressBar;
use shelfload_core::parse_line;
use shelfload_store::{AuthorStore, BookStore};

use crate::config::WorkOptions;
use crate::error::LoadError;
use crate::loader::{LineError, Outcome, scan_dump};
use crate::stats::{Phase, PhaseStats};
use crate::transform::WorkRow;

/// Name stored for author ids with no record in the author store
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Look up each id's display name, in order.
pub fn resolve_author_names<A>(ids: &[String], authors: &A) -> anyhow::Result<Vec<String>>
where
    A: AuthorStore + ?Sized,
{
    ids.iter()
        .map(|id| -> anyhow::Result<String> {
            Ok(authors
                .find_author(id)?
                .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |author| author.name))
        })
        .collect()
}

/// Load the first `opts.line_limit` lines of the works dump into `books`.
///
/// Must run after the author phase: author names are read from `authors`.
pub fn load_works<A, B>(
    path: &Path,
    opts: &WorkOptions,
    authors: &A,
    books: &B,
    pb: &ProgressBar,
) -> Result<PhaseStats, LoadError>
where
    A: AuthorStore + ?Sized,
    B: BookStore + ?Sized,
{
    log::debug!(
        "works: line limit {}, gated on `{}`",
        opts.line_limit,
        opts.author_gate
    );
    scan_dump(Phase::Works, path, Some(opts.line_limit), pb, |line| {
        let row: WorkRow = parse_line(line)?;
        let Some(work) = row.extract(opts.author_gate)? else {
            return Ok(Outcome::Filtered);
        };
        let names = resolve_author_names(&work.author_ids, authors).map_err(LineError::Store)?;
        books
            .upsert_book(&work.into_book(names))
            .map_err(LineError::Store)?;
        Ok(Outcome::Written)
    })
}
