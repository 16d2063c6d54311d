//! Persisted record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An author, keyed by its Open Library id (e.g. `OL1A`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    /// Display name; empty when the dump has none
    pub name: String,
    /// Alternate personal name; empty when the dump has none
    pub personal_name: String,
}

impl Author {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        personal_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            personal_name: personal_name.into(),
        }
    }
}

/// A work with its author references resolved to display names.
///
/// `author_names[i]` is the name for `author_ids[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    /// Title; empty when the dump has none
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    #[serde(default)]
    pub cover_ids: Vec<String>,
    #[serde(default)]
    pub author_ids: Vec<String>,
    #[serde(default)]
    pub author_names: Vec<String>,
}

impl Book {
    /// Book with only id and title set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            published_date: None,
            cover_ids: Vec::new(),
            author_ids: Vec::new(),
            author_names: Vec::new(),
        }
    }
}
