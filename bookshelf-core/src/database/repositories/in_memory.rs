use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bookshelf_model::{Author, AuthorID, Book, BookForCreation, BookID};
use tokio::sync::RwLock;

use crate::{
    database::{ports::books::BooksRepository, seed},
    error::{BooksError, Result},
};

#[derive(Debug, Default)]
struct Store {
    authors: HashMap<AuthorID, Author>,
    books: HashMap<BookID, Book>,
}

impl Store {
    fn prepare(&self, request: &BookForCreation) -> Result<Book> {
        request.validate()?;
        let author = self
            .authors
            .get(&request.author_id)
            .cloned()
            .ok_or_else(|| {
                BooksError::NotFound(format!("author {}", request.author_id))
            })?;

        Ok(Book {
            id: BookID::new(),
            author,
            title: request.title.trim().to_string(),
            description: request.description.clone(),
        })
    }
}

/// Process-local book store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBooksRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the reference authors and books.
    pub fn seeded() -> Self {
        let store = Store {
            authors: seed::authors()
                .into_iter()
                .map(|author| (author.id, author))
                .collect(),
            books: seed::books()
                .into_iter()
                .map(|book| (book.id, book))
                .collect(),
        };
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn insert_author(&self, author: Author) {
        self.store.write().await.authors.insert(author.id, author);
    }
}

#[async_trait]
impl BooksRepository for InMemoryBooksRepository {
    async fn list_books(&self) -> Result<Vec<Book>> {
        let store = self.store.read().await;
        let mut books: Vec<Book> = store.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn get_book(&self, id: BookID) -> Result<Option<Book>> {
        Ok(self.store.read().await.books.get(&id).cloned())
    }

    async fn get_books(&self, ids: &[BookID]) -> Result<Vec<Book>> {
        let store = self.store.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.books.get(id).cloned())
            .collect())
    }

    async fn add_book(&self, book: BookForCreation) -> Result<Book> {
        let mut store = self.store.write().await;
        let book = store.prepare(&book)?;
        store.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn add_books(
        &self,
        books: Vec<BookForCreation>,
    ) -> Result<Vec<Book>> {
        let mut store = self.store.write().await;
        let prepared = books
            .iter()
            .map(|request| store.prepare(request))
            .collect::<Result<Vec<_>>>()?;
        for book in &prepared {
            store.books.insert(book.id, book.clone());
        }
        Ok(prepared)
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        let store = self.store.read().await;
        let mut authors: Vec<Author> =
            store.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(authors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(author_id: AuthorID, title: &str) -> BookForCreation {
        BookForCreation {
            author_id,
            title: title.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn seeded_store_lists_books_by_title() {
        let repo = InMemoryBooksRepository::seeded();
        let titles: Vec<String> = repo
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .map(|book| book.title)
            .collect();

        assert_eq!(titles.len(), 5);
        assert_eq!(
            titles.first().map(String::as_str),
            Some("A Game of Thrones")
        );
        let mut sorted = titles.clone();
        sorted.sort();
        assert_eq!(titles, sorted);
    }

    #[tokio::test]
    async fn get_books_keeps_request_order_and_skips_unknown_ids() {
        let repo = InMemoryBooksRepository::seeded();
        let books = repo
            .get_books(&[seed::MYTHOS, BookID::new(), seed::A_GAME_OF_THRONES])
            .await
            .unwrap();

        let ids: Vec<BookID> = books.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![seed::MYTHOS, seed::A_GAME_OF_THRONES]);
    }

    #[tokio::test]
    async fn add_book_requires_known_author() {
        let repo = InMemoryBooksRepository::seeded();

        let err = repo
            .add_book(request(AuthorID::new(), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, BooksError::NotFound(_)));

        let book = repo
            .add_book(request(seed::STEPHEN_FRY, "  Heroes "))
            .await
            .unwrap();
        assert_eq!(book.title, "Heroes");
        assert_eq!(book.author.full_name(), "Stephen Fry");
        assert_eq!(repo.get_book(book.id).await.unwrap(), Some(book));
    }

    #[tokio::test]
    async fn add_books_is_all_or_nothing() {
        let repo = InMemoryBooksRepository::seeded();

        let err = repo
            .add_books(vec![
                request(seed::DOUGLAS_ADAMS, "Mostly Harmless"),
                request(AuthorID::new(), "Nobody's Book"),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, BooksError::NotFound(_)));
        assert_eq!(repo.list_books().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn invalid_books_are_rejected() {
        let repo = InMemoryBooksRepository::seeded();
        let err = repo
            .add_book(request(seed::JAMES_ELROY, "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, BooksError::Model(_)));
    }
}
