//! Shelfload Open Library - two-phase author/work dump loader
//!
//! Loads the Open Library authors dump into an [`AuthorStore`], then the
//! works dump into a [`BookStore`], resolving each work's author references
//! to display names through the author store.
//!
//! # Example
//!
//! ```no_run
//! use shelfload_core::ProgressContext;
//! use shelfload_openlibrary::{LoadConfig, run};
//! use shelfload_store::MemoryStore;
//!
//! let config = LoadConfig {
//!     authors_dump: "ol_dump_authors.txt.gz".into(),
//!     works_dump: "ol_dump_works.txt.gz".into(),
//!     ..Default::default()
//! };
//!
//! let store = MemoryStore::new();
//! let summary = run(&config, &store, &store, &ProgressContext::hidden());
//! println!("{} books", store.book_count());
//! # let _ = summary;
//! ```
//!
//! [`AuthorStore`]: shelfload_store::AuthorStore
//! [`BookStore`]: shelfload_store::BookStore

pub mod authors;
pub mod config;
pub mod error;
mod loader;
pub mod runner;
pub mod stats;
pub mod transform;
pub mod works;

// Re-exports for convenience
pub use authors::load_authors;
pub use config::{AuthorGate, DEFAULT_WORK_LINE_LIMIT, LoadConfig, WorkOptions};
pub use error::LoadError;
pub use runner::{PhaseOutcome, RunSummary, run};
pub use stats::{Phase, PhaseStats, SkippedLine};
pub use works::{UNKNOWN_AUTHOR, load_works};
