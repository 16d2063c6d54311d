//! shelfload-store: Author and Book records and the stores that hold them
//!
//! The loaders only see the [`AuthorStore`] and [`BookStore`] traits
//! (upsert by primary key, lookup by id). Two implementations ship here:
//! [`MemoryStore`] for tests and dry runs, and [`JsonStore`], a directory of
//! one JSON document per record addressed by a blake3 hash of its id.

pub mod hash;
pub mod json;
pub mod memory;
pub mod record;
pub mod store;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use record::{Author, Book};
pub use store::{AuthorStore, BookStore};
