use std::fmt;

use async_trait::async_trait;
use bookshelf_model::{Author, Book, BookForCreation, BookID};

use crate::error::Result;

#[async_trait]
pub trait BooksRepository: Send + Sync + fmt::Debug {
    /// All books with their authors, ordered by title.
    async fn list_books(&self) -> Result<Vec<Book>>;

    async fn get_book(&self, id: BookID) -> Result<Option<Book>>;

    /// The subset of `ids` that exist, in the order requested. Unknown ids
    /// are skipped; callers compare lengths to detect them.
    async fn get_books(&self, ids: &[BookID]) -> Result<Vec<Book>>;

    /// Validate and store a new book. Fails with `NotFound` when the author
    /// does not exist.
    async fn add_book(&self, book: BookForCreation) -> Result<Book>;

    /// Store several books atomically: either all are added or none.
    async fn add_books(&self, books: Vec<BookForCreation>) -> Result<Vec<Book>>;

    async fn list_authors(&self) -> Result<Vec<Author>>;
}
