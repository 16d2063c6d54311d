//! Open Library JSON rows and their extraction into store records

pub mod author;
pub mod work;

/// Key prefix of author references (`/authors/OL1A`)
pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Key prefix of work records (`/works/OL45W`)
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Strip a literal key prefix; keys without it are returned unchanged.
pub fn strip_key<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

// Re-exports
pub use author::AuthorRow;
pub use work::{WorkExtract, WorkRow, parse_created};
