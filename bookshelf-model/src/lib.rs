//! Data model definitions shared across Bookshelf crates.
#![allow(missing_docs)]

pub mod book;
pub mod cover;
pub mod error;
pub mod ids;

pub use book::{
    Author, Book, BookDto, BookForCreation, BookWithCovers, CoversStatus,
};
pub use cover::{BookCover, DEFAULT_COVER_COUNT, DEFAULT_FAULT_TARGET};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{AuthorID, BookID};
