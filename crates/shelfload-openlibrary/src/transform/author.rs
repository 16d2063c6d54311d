//! Author entity extraction: JSON → Author

use serde::Deserialize;
use shelfload_core::RecordError;
use shelfload_core::line::lenient;
use shelfload_store::Author;

use super::{AUTHOR_KEY_PREFIX, strip_key};

/// Open Library author JSON structure
#[derive(Debug, Deserialize)]
pub struct AuthorRow {
    /// Reference path (e.g., "/authors/OL1A")
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub key: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub personal_name: String,
}

impl AuthorRow {
    /// Key with the `/authors/` prefix removed
    pub fn short_id(&self) -> &str {
        strip_key(&self.key, AUTHOR_KEY_PREFIX)
    }

    /// Build the stored record. A row without a usable key is rejected.
    pub fn into_author(self) -> Result<Author, RecordError> {
        let id = self.short_id().to_string();
        if id.is_empty() {
            return Err(RecordError::missing("key"));
        }
        Ok(Author::new(id, self.name, self.personal_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfload_core::parse_line;

    #[test]
    fn parse_author_line() {
        let row: AuthorRow =
            parse_line(r#"#@123 {"key":"/authors/OL1A","name":"Jane Doe"}"#).unwrap();
        let author = row.into_author().unwrap();
        assert_eq!(author, Author::new("OL1A", "Jane Doe", ""));
    }

    #[test]
    fn personal_name_kept() {
        let row: AuthorRow = parse_line(
            r#"{"key":"/authors/OL2A","name":"J. R. R. Tolkien","personal_name":"John Ronald Reuel Tolkien"}"#,
        )
        .unwrap();
        let author = row.into_author().unwrap();
        assert_eq!(author.personal_name, "John Ronald Reuel Tolkien");
    }

    #[test]
    fn missing_names_default_to_empty() {
        let row: AuthorRow = parse_line(r#"{"key":"/authors/OL3A"}"#).unwrap();
        let author = row.into_author().unwrap();
        assert_eq!(author.name, "");
        assert_eq!(author.personal_name, "");
    }

    #[test]
    fn missing_key_rejected() {
        let row: AuthorRow = parse_line(r#"{"name":"Nobody"}"#).unwrap();
        assert_eq!(row.into_author().unwrap_err(), RecordError::missing("key"));
    }

    #[test]
    fn bare_prefix_key_rejected() {
        let row: AuthorRow = parse_line(r#"{"key":"/authors/","name":"x"}"#).unwrap();
        assert!(row.into_author().is_err());
    }

    #[test]
    fn unknown_fields_ignored() {
        let row: AuthorRow = parse_line(
            r#"{"key":"/authors/OL4A","name":"A","type":{"key":"/type/author"},"revision":3,"links":[]}"#,
        )
        .unwrap();
        assert_eq!(row.short_id(), "OL4A");
    }
}
