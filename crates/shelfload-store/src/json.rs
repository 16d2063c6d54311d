//! File-backed document store
//!
//! Directory layout:
//! ```text
//! {base}/
//! ├── authors/
//! │   └── {hh}/{hash}.json    # hash = blake3(id)[..16], hh = hash[..2]
//! └── books/
//!     └── {hh}/{hash}.json
//! ```
//!
//! Each document carries its own id. Writes go to `{hash}.json.tmp` and are
//! renamed into place, so a reader never sees a half-written record.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::hash::doc_hash;
use crate::record::{Author, Book};
use crate::store::{AuthorStore, BookStore, ensure_id};

/// Record collections in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Authors,
    Books,
}

impl Collection {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Authors => "authors",
            Self::Books => "books",
        }
    }
}

/// Records that know their own primary key.
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Author {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Book {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One JSON document per record under `base`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    base: PathBuf,
}

impl JsonStore {
    /// Open (creating if needed) a store rooted at `base`.
    pub fn new(base: &Path) -> Result<Self> {
        for collection in [Collection::Authors, Collection::Books] {
            let dir = base.join(collection.dir_name());
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create store dir: {}", dir.display()))?;
        }
        log::debug!("json store at {}", base.display());
        Ok(Self {
            base: base.to_path_buf(),
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the document for `id` in `collection`.
    pub fn doc_path(&self, collection: Collection, id: &str) -> PathBuf {
        let hash = doc_hash(id);
        self.base
            .join(collection.dir_name())
            .join(&hash[..2])
            .join(format!("{hash}.json"))
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: Collection) -> Result<usize> {
        let dir = self.base.join(collection.dir_name());
        let mut total = 0;
        for shard in fs::read_dir(&dir).with_context(|| format!("failed to list {}", dir.display()))? {
            let shard = shard?.path();
            if !shard.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&shard)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    total += 1;
                }
            }
        }
        Ok(total)
    }

    fn write_doc<T: Serialize + Keyed>(&self, collection: Collection, doc: &T) -> Result<()> {
        let path = self.doc_path(collection, doc.key());
        let parent = path
            .parent()
            .with_context(|| format!("doc path has no parent: {}", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec(doc)?;
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| {
            format!("failed to rename {} → {}", tmp.display(), path.display())
        })?;
        Ok(())
    }

    fn read_doc<T: DeserializeOwned + Keyed>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<T>> {
        let path = self.doc_path(collection, id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        let doc: T = serde_json::from_slice(&bytes)
            .with_context(|| format!("corrupt document {}", path.display()))?;
        if doc.key() != id {
            bail!(
                "hash collision in {}: {} holds {:?}, wanted {:?}",
                collection.dir_name(),
                path.display(),
                doc.key(),
                id
            );
        }
        Ok(Some(doc))
    }
}

impl AuthorStore for JsonStore {
    fn upsert_author(&self, author: &Author) -> Result<()> {
        ensure_id("author", &author.id)?;
        self.write_doc(Collection::Authors, author)
    }

    fn find_author(&self, id: &str) -> Result<Option<Author>> {
        self.read_doc(Collection::Authors, id)
    }
}

impl BookStore for JsonStore {
    fn upsert_book(&self, book: &Book) -> Result<()> {
        ensure_id("book", &book.id)?;
        self.write_doc(Collection::Books, book)
    }

    fn find_book(&self, id: &str) -> Result<Option<Book>> {
        self.read_doc(Collection::Books, id)
    }
}
