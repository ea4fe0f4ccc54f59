use crate::{
    cover::BookCover,
    error::{ModelError, Result},
    ids::{AuthorID, BookID},
};

pub const TITLE_MAX_LEN: usize = 150;
pub const DESCRIPTION_MAX_LEN: usize = 2500;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Author {
    pub id: AuthorID,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Persisted book together with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Book {
    pub id: BookID,
    pub author: Author,
    pub title: String,
    pub description: Option<String>,
}

/// Request body for creating a book.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BookForCreation {
    pub author_id: AuthorID,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl BookForCreation {
    pub fn validate(&self) -> Result<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ModelError::InvalidBook("title is required".into()));
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(ModelError::InvalidBook(format!(
                "title must be at most {TITLE_MAX_LEN} characters"
            )));
        }
        if let Some(description) = &self.description
            && description.chars().count() > DESCRIPTION_MAX_LEN
        {
            return Err(ModelError::InvalidBook(format!(
                "description must be at most {DESCRIPTION_MAX_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Outward projection of a [`Book`] with the author flattened to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BookDto {
    pub id: BookID,
    pub author: String,
    pub title: String,
    pub description: Option<String>,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            author: book.author.full_name(),
            title: book.title.clone(),
            description: book.description.clone(),
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            author: book.author.full_name(),
            title: book.title,
            description: book.description,
        }
    }
}

/// How complete the cover list attached to a [`BookWithCovers`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoversStatus {
    /// Every requested cover was downloaded.
    Complete,
    /// The download was cancelled; only covers finished before that are present.
    Partial,
    /// The download was cancelled before any cover finished.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BookWithCovers {
    pub id: BookID,
    pub author: String,
    pub title: String,
    pub description: Option<String>,
    pub book_covers: Vec<BookCover>,
    pub covers_status: CoversStatus,
}

impl BookWithCovers {
    pub fn new(
        book: Book,
        book_covers: Vec<BookCover>,
        covers_status: CoversStatus,
    ) -> Self {
        let BookDto {
            id,
            author,
            title,
            description,
        } = BookDto::from(book);
        Self {
            id,
            author,
            title,
            description,
            book_covers,
            covers_status,
        }
    }
}
