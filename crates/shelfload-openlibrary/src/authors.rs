//! Author phase: authors dump → AuthorStore

use std::path::Path;

use indicatif::ProgressBar;
use shelfload_core::parse_line;
use shelfload_store::AuthorStore;

use crate::error::LoadError;
use crate::loader::{LineError, Outcome, scan_dump};
use crate::stats::{Phase, PhaseStats};
use crate::transform::AuthorRow;

/// Load every line of the authors dump into `store`.
///
/// Each author is upserted as soon as its line is parsed, so re-running on
/// the same dump leaves the store unchanged.
pub fn load_authors<S>(path: &Path, store: &S, pb: &ProgressBar) -> Result<PhaseStats, LoadError>
where
    S: AuthorStore + ?Sized,
{
    scan_dump(Phase::Authors, path, None, pb, |line| {
        let author = parse_line::<AuthorRow>(line)?.into_author()?;
        store.upsert_author(&author).map_err(LineError::Store)?;
        Ok(Outcome::Written)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfload_core::SkipKind;
    use shelfload_store::{Author, MemoryStore};

    fn write_dump(lines: &[&str]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ol_dump_authors.txt");
        std::fs::write(&path, lines.join("\n")).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_example_author() {
        let (_dir, path) = write_dump(&[r#"#@123 {"key":"/authors/OL1A","name":"Jane Doe"}"#]);
        let store = MemoryStore::new();
        let stats = load_authors(&path, &store, &ProgressBar::hidden()).unwrap();

        assert_eq!(stats.records_written, 1);
        assert_eq!(
            store.find_author("OL1A").unwrap(),
            Some(Author::new("OL1A", "Jane Doe", ""))
        );
    }

    #[test]
    fn malformed_lines_do_not_abort() {
        let (_dir, path) = write_dump(&[
            r#"/type/author	/authors/OL1A	1	2008-04-01T03:28:50.625462	{"key":"/authors/OL1A","name":"A"}"#,
            "garbage without payload",
            r#"x {"key": "/authors/OL2A", "name": "#,
            r#"{"name":"keyless"}"#,
            r#"/type/author	/authors/OL3A	1	2008-04-01T03:28:50.625462	{"key":"/authors/OL3A","personal_name":"C"}"#,
        ]);
        let store = MemoryStore::new();
        let stats = load_authors(&path, &store, &ProgressBar::hidden()).unwrap();

        assert_eq!(stats.lines_read, 5);
        assert_eq!(stats.records_written, 2);
        assert_eq!(stats.skipped_count(SkipKind::Malformed), 2);
        assert_eq!(stats.skipped_count(SkipKind::MissingField), 1);
        assert_eq!(store.author_count(), 2);
        assert_eq!(store.find_author("OL3A").unwrap().unwrap().name, "");
    }

    #[test]
    fn duplicate_keys_upsert() {
        let (_dir, path) = write_dump(&[
            r#"{"key":"/authors/OL1A","name":"First"}"#,
            r#"{"key":"/authors/OL1A","name":"Second"}"#,
        ]);
        let store = MemoryStore::new();
        load_authors(&path, &store, &ProgressBar::hidden()).unwrap();
        assert_eq!(store.author_count(), 1);
        assert_eq!(store.find_author("OL1A").unwrap().unwrap().name, "Second");
    }

    #[test]
    fn missing_dump_fails_phase() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let err = load_authors(&dir.path().join("nope.txt"), &store, &ProgressBar::hidden())
            .unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
    }
}
