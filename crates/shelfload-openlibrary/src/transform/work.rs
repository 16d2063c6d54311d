//! Work entity extraction: JSON → Book fields
//!
//! Nested fields are kept as raw `serde_json::Value`s so a field of an
//! unexpected shape only affects that field, never the whole line:
//! a non-object `description`/`created` reads as absent, a non-array
//! `covers`/`authors` reads as absent.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use shelfload_core::RecordError;
use shelfload_core::line::lenient;
use shelfload_store::Book;

use super::{AUTHOR_KEY_PREFIX, WORK_KEY_PREFIX, strip_key};
use crate::config::AuthorGate;

/// Layout of `created.value`, e.g. `2009-10-15T11:34:21.437031`
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Byte length of a timestamp in [`CREATED_FORMAT`]
const CREATED_LEN: usize = 26;

// === Row struct (deserialized from JSON) ===

/// Open Library work JSON structure
#[derive(Debug, Deserialize)]
pub struct WorkRow {
    /// Reference path (e.g., "/works/OL45W")
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub key: String,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: String,

    /// `{"type": "/type/text", "value": "..."}`
    #[serde(default)]
    pub description: Option<Value>,

    /// `{"type": "/type/datetime", "value": "2009-10-15T11:34:21.437031"}`
    #[serde(default)]
    pub created: Option<Value>,

    /// Cover image ids (numbers in the dumps)
    #[serde(default)]
    pub covers: Option<Value>,

    /// `[{"author": {"key": "/authors/OL1A"}, "type": ...}]`
    #[serde(default)]
    pub authors: Option<Value>,
}

/// Everything a [`Book`] needs except the resolved author names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkExtract {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    pub author_ids: Vec<String>,
}

impl WorkExtract {
    /// Attach author names (same order as `author_ids`) and build the record.
    pub fn into_book(self, author_names: Vec<String>) -> Book {
        debug_assert_eq!(self.author_ids.len(), author_names.len());
        Book {
            id: self.id,
            name: self.name,
            description: self.description,
            published_date: self.published_date,
            cover_ids: self.cover_ids,
            author_ids: self.author_ids,
            author_names,
        }
    }
}

/// Parse `created.value` and keep its calendar date.
///
/// Exactly `YYYY-MM-DDTHH:MM:SS.ffffff` (six fractional digits) is accepted.
pub fn parse_created(value: &str) -> Result<NaiveDate, RecordError> {
    let bad = |reason: String| RecordError::BadTimestamp {
        value: value.to_string(),
        reason,
    };
    if value.len() != CREATED_LEN || value.as_bytes()[19] != b'.' {
        return Err(bad("expected YYYY-MM-DDTHH:MM:SS.ffffff".to_string()));
    }
    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .map(|dt| dt.date())
        .map_err(|e| bad(e.to_string()))
}

impl WorkRow {
    /// Key with the `/works/` prefix removed
    pub fn short_id(&self) -> &str {
        strip_key(&self.key, WORK_KEY_PREFIX)
    }

    /// `description.value` when `description` is an object
    pub fn description_text(&self) -> Option<String> {
        self.description
            .as_ref()
            .and_then(Value::as_object)
            .map(|obj| obj.get("value").map(lenient::as_text).unwrap_or_default())
    }

    /// Date part of `created.value`; `value` is mandatory once `created` is an object
    pub fn published_date(&self) -> Result<Option<NaiveDate>, RecordError> {
        let Some(created) = self.created.as_ref().and_then(Value::as_object) else {
            return Ok(None);
        };
        let value = created
            .get("value")
            .and_then(Value::as_str)
            .ok_or_else(|| RecordError::missing("created.value"))?;
        parse_created(value).map(Some)
    }

    /// Cover ids as strings, in source order
    pub fn cover_ids(&self) -> Vec<String> {
        self.covers
            .as_ref()
            .and_then(Value::as_array)
            .map(|covers| covers.iter().map(lenient::as_text).collect())
            .unwrap_or_default()
    }

    /// Author ids referenced by this work, or `None` when the gating array
    /// is absent and the work must not become a book.
    pub fn author_ids(&self, gate: AuthorGate) -> Result<Option<Vec<String>>, RecordError> {
        let authors = self.authors.as_ref().and_then(Value::as_array);
        let count = match gate {
            AuthorGate::Authors => match authors {
                Some(entries) => entries.len(),
                None => return Ok(None),
            },
            AuthorGate::Covers => match self.covers.as_ref().and_then(Value::as_array) {
                Some(covers) => covers.len(),
                None => return Ok(None),
            },
        };

        let entries = authors.map(Vec::as_slice).unwrap_or_default();
        if entries.len() < count {
            return Err(RecordError::missing("authors"));
        }
        entries[..count]
            .iter()
            .enumerate()
            .map(|(i, entry)| author_ref_id(i, entry))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Extract all book fields. `Ok(None)` means the work was gated out.
    pub fn extract(&self, gate: AuthorGate) -> Result<Option<WorkExtract>, RecordError> {
        let description = self.description_text();
        let published_date = self.published_date()?;
        let cover_ids = self.cover_ids();
        let Some(author_ids) = self.author_ids(gate)? else {
            return Ok(None);
        };

        let id = self.short_id();
        if id.is_empty() {
            return Err(RecordError::missing("key"));
        }

        Ok(Some(WorkExtract {
            id: id.to_string(),
            name: self.title.clone(),
            description,
            published_date,
            cover_ids,
            author_ids,
        }))
    }
}

/// `authors[i].author.key` with the `/authors/` prefix removed
fn author_ref_id(i: usize, entry: &Value) -> Result<String, RecordError> {
    entry
        .get("author")
        .and_then(|author| author.get("key"))
        .and_then(Value::as_str)
        .map(|key| strip_key(key, AUTHOR_KEY_PREFIX).to_string())
        .ok_or_else(|| RecordError::missing(format!("authors[{i}].author.key")))
}
