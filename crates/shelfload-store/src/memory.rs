//! In-memory store backed by hash maps

use std::sync::RwLock;

use anyhow::{Result, anyhow};
use rustc_hash::FxHashMap;

use crate::record::{Author, Book};
use crate::store::{AuthorStore, BookStore, ensure_id};

/// Author and book maps behind `RwLock`s.
#[derive(Debug, Default)]
pub struct MemoryStore {
    authors: RwLock<FxHashMap<String, Author>>,
    books: RwLock<FxHashMap<String, Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author_count(&self) -> usize {
        self.authors.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn book_count(&self) -> usize {
        self.books.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Snapshot of all authors, sorted by id.
    pub fn authors(&self) -> Vec<Author> {
        let mut all: Vec<Author> = self
            .authors
            .read()
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Snapshot of all books, sorted by id.
    pub fn books(&self) -> Vec<Book> {
        let mut all: Vec<Book> = self
            .books
            .read()
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

fn poisoned(what: &str) -> anyhow::Error {
    anyhow!("{what} map lock poisoned")
}

impl AuthorStore for MemoryStore {
    fn upsert_author(&self, author: &Author) -> Result<()> {
        ensure_id("author", &author.id)?;
        self.authors
            .write()
            .map_err(|_| poisoned("author"))?
            .insert(author.id.clone(), author.clone());
        Ok(())
    }

    fn find_author(&self, id: &str) -> Result<Option<Author>> {
        Ok(self
            .authors
            .read()
            .map_err(|_| poisoned("author"))?
            .get(id)
            .cloned())
    }
}

impl BookStore for MemoryStore {
    fn upsert_book(&self, book: &Book) -> Result<()> {
        ensure_id("book", &book.id)?;
        self.books
            .write()
            .map_err(|_| poisoned("book"))?
            .insert(book.id.clone(), book.clone());
        Ok(())
    }

    fn find_book(&self, id: &str) -> Result<Option<Book>> {
        Ok(self
            .books
            .read()
            .map_err(|_| poisoned("book"))?
            .get(id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_overwrites() {
        let store = MemoryStore::new();
        store
            .upsert_author(&Author::new("OL1A", "Jane", ""))
            .unwrap();
        store
            .upsert_author(&Author::new("OL1A", "Jane Doe", "J. Doe"))
            .unwrap();

        assert_eq!(store.author_count(), 1);
        let found = store.find_author("OL1A").unwrap().unwrap();
        assert_eq!(found.name, "Jane Doe");
        assert_eq!(found.personal_name, "J. Doe");
    }

    #[test]
    fn find_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.find_author("OL404A").unwrap().is_none());
        assert!(store.find_book("OL404W").unwrap().is_none());
    }

    #[test]
    fn empty_id_rejected() {
        let store = MemoryStore::new();
        assert!(store.upsert_author(&Author::new("", "x", "")).is_err());
        assert!(store.upsert_book(&Book::new("", "x")).is_err());
        assert_eq!(store.author_count(), 0);
    }

    #[test]
    fn snapshots_sorted() {
        let store = MemoryStore::new();
        store.upsert_book(&Book::new("OL2W", "b")).unwrap();
        store.upsert_book(&Book::new("OL1W", "a")).unwrap();
        let ids: Vec<_> = store.books().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["OL1W", "OL2W"]);
    }

    #[test]
    fn usable_through_reference() {
        fn put(store: impl AuthorStore) {
            store.upsert_author(&Author::new("OL9A", "Ref", "")).unwrap();
        }

        let store = MemoryStore::new();
        put(&store);
        assert_eq!(store.author_count(), 1);
    }
}
