//! Store interfaces consumed by the loaders

use anyhow::Result;

use crate::record::{Author, Book};

/// Author persistence: upsert by id, lookup by id.
///
/// Methods take `&self`; implementations handle their own synchronization so
/// one value can back both the author and book side of a run.
pub trait AuthorStore {
    /// Insert or overwrite the author with `author.id`.
    fn upsert_author(&self, author: &Author) -> Result<()>;

    fn find_author(&self, id: &str) -> Result<Option<Author>>;
}

/// Book persistence: upsert by id, lookup by id.
pub trait BookStore {
    /// Insert or overwrite the book with `book.id`.
    fn upsert_book(&self, book: &Book) -> Result<()>;

    fn find_book(&self, id: &str) -> Result<Option<Book>>;
}

impl<T: AuthorStore + ?Sized> AuthorStore for &T {
    fn upsert_author(&self, author: &Author) -> Result<()> {
        (**self).upsert_author(author)
    }

    fn find_author(&self, id: &str) -> Result<Option<Author>> {
        (**self).find_author(id)
    }
}

impl<T: BookStore + ?Sized> BookStore for &T {
    fn upsert_book(&self, book: &Book) -> Result<()> {
        (**self).upsert_book(book)
    }

    fn find_book(&self, id: &str) -> Result<Option<Book>> {
        (**self).find_book(id)
    }
}

/// Reject records that would violate the non-empty primary key invariant.
pub(crate) fn ensure_id(kind: &str, id: &str) -> Result<()> {
    anyhow::ensure!(!id.is_empty(), "refusing to store {kind} with empty id");
    Ok(())
}
