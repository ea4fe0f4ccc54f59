use async_trait::async_trait;
use bookshelf_model::{Author, AuthorID, Book, BookForCreation, BookID};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    database::ports::books::BooksRepository,
    error::{BooksError, Result},
};

const BOOK_COLUMNS: &str = r#"
    b.id,
    b.title,
    b.description,
    a.id AS author_id,
    a.first_name,
    a.last_name
"#;

#[derive(Debug, Clone)]
pub struct PostgresBooksRepository {
    pool: PgPool,
}

impl PostgresBooksRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_author(row: &PgRow, id_column: &str) -> Result<Author> {
        let id: Uuid = row.try_get(id_column).map_err(|e| {
            BooksError::Database(format!("Failed to read author id: {e}"))
        })?;
        let first_name: String = row.try_get("first_name").map_err(|e| {
            BooksError::Database(format!("Failed to read first_name: {e}"))
        })?;
        let last_name: String = row.try_get("last_name").map_err(|e| {
            BooksError::Database(format!("Failed to read last_name: {e}"))
        })?;

        Ok(Author {
            id: AuthorID(id),
            first_name,
            last_name,
        })
    }

    fn map_row(row: &PgRow) -> Result<Book> {
        let id: Uuid = row.try_get("id").map_err(|e| {
            BooksError::Database(format!("Failed to read book id: {e}"))
        })?;
        let title: String = row.try_get("title").map_err(|e| {
            BooksError::Database(format!("Failed to read title: {e}"))
        })?;
        let description: Option<String> =
            row.try_get("description").map_err(|e| {
                BooksError::Database(format!("Failed to read description: {e}"))
            })?;

        Ok(Book {
            id: BookID(id),
            author: Self::map_author(row, "author_id")?,
            title,
            description,
        })
    }

    async fn insert_book(
        conn: &mut PgConnection,
        request: &BookForCreation,
    ) -> Result<Book> {
        request.validate()?;

        let author_row = sqlx::query(
            r#"
            SELECT id, first_name, last_name
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(request.author_id.to_uuid())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            BooksError::Database(format!("Failed to load author: {e}"))
        })?;

        let Some(author_row) = author_row else {
            return Err(BooksError::NotFound(format!(
                "author {}",
                request.author_id
            )));
        };
        let author = Self::map_author(&author_row, "id")?;

        let book = Book {
            id: BookID::new(),
            author,
            title: request.title.trim().to_string(),
            description: request.description.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO books (id, author_id, title, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(book.id.to_uuid())
        .bind(book.author.id.to_uuid())
        .bind(&book.title)
        .bind(&book.description)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            BooksError::Database(format!("Failed to insert book: {e}"))
        })?;

        Ok(book)
    }
}

#[async_trait]
impl BooksRepository for PostgresBooksRepository {
    async fn list_books(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title
            "#
        ))
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            BooksError::Database(format!("Failed to list books: {e}"))
        })?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn get_book(&self, id: BookID) -> Result<Option<Book>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#
        ))
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            BooksError::Database(format!("Failed to load book {id}: {e}"))
        })?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn get_books(&self, ids: &[BookID]) -> Result<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(BookID::to_uuid).collect();

        let rows = sqlx::query(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = ANY($1)
            "#
        ))
        .bind(uuids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            BooksError::Database(format!("Failed to load books: {e}"))
        })?;

        let mut found = rows
            .iter()
            .map(Self::map_row)
            .collect::<Result<Vec<_>>>()?;
        found.sort_by_key(|book| {
            ids.iter().position(|id| *id == book.id).unwrap_or(usize::MAX)
        });
        Ok(found)
    }

    async fn add_book(&self, book: BookForCreation) -> Result<Book> {
        let mut conn = self.pool().acquire().await.map_err(|e| {
            BooksError::Database(format!("Failed to acquire connection: {e}"))
        })?;
        Self::insert_book(&mut conn, &book).await
    }

    async fn add_books(
        &self,
        books: Vec<BookForCreation>,
    ) -> Result<Vec<Book>> {
        let mut tx = self.pool().begin().await.map_err(|e| {
            BooksError::Database(format!("Failed to begin transaction: {e}"))
        })?;

        let mut added = Vec::with_capacity(books.len());
        for request in &books {
            // Dropping `tx` on error rolls the batch back.
            added.push(Self::insert_book(&mut tx, request).await?);
        }

        tx.commit().await.map_err(|e| {
            BooksError::Database(format!("Failed to commit books: {e}"))
        })?;
        Ok(added)
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name
            FROM authors
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            BooksError::Database(format!("Failed to list authors: {e}"))
        })?;

        rows.iter().map(|row| Self::map_author(row, "id")).collect()
    }
}
