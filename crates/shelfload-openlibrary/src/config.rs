//! Open Library loader configuration

use std::fmt;
use std::path::PathBuf;

/// Number of work dump lines read per run unless overridden.
pub const DEFAULT_WORK_LINE_LIMIT: usize = 50;

/// Which array decides whether a work is turned into a book.
///
/// `Authors` builds a book for every work that has an `authors` array.
/// `Covers` keeps the historical loader's behavior: the `covers` array gates
/// author extraction, `covers.len()` author entries are read, and a work with
/// covers but no authors fails with a missing-field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorGate {
    #[default]
    Authors,
    Covers,
}

impl AuthorGate {
    /// Parse gate from string name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "authors" => Some(Self::Authors),
            "covers" => Some(Self::Covers),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Authors => "authors",
            Self::Covers => "covers",
        }
    }
}

impl fmt::Display for AuthorGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Work phase knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkOptions {
    /// Maximum number of dump lines read (malformed lines count too)
    pub line_limit: usize,
    pub author_gate: AuthorGate,
}

impl Default for WorkOptions {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_WORK_LINE_LIMIT,
            author_gate: AuthorGate::default(),
        }
    }
}

/// Runtime configuration for a full load
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Authors dump (`.txt` or `.txt.gz`)
    pub authors_dump: PathBuf,
    /// Works dump (`.txt` or `.txt.gz`)
    pub works_dump: PathBuf,
    pub works: WorkOptions,
    /// Skip the work phase when the author phase fails
    pub strict_phases: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            authors_dump: PathBuf::from("ol_dump_authors.txt.gz"),
            works_dump: PathBuf::from("ol_dump_works.txt.gz"),
            works: WorkOptions::default(),
            strict_phases: false,
        }
    }
}
