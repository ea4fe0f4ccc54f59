//! # Bookshelf Core
//!
//! Business logic behind the Bookshelf API.
//!
//! - [`covers`]: concurrent download of a book's covers from the external
//!   cover service, with cooperative cancellation when any single download
//!   fails.
//! - [`database`]: the [`database::ports::books::BooksRepository`] port and
//!   its PostgreSQL and in-memory implementations.
//! - [`error`]: the error type shared by the repository layer.
//!
//! ## Feature Flags
//!
//! - `database` (default): PostgreSQL support through SQLx, plus the embedded
//!   [`MIGRATOR`].
//! - `pg-tests`: enables the repository tests that need a live PostgreSQL.

pub mod covers;
pub mod database;
pub mod error;

pub use error::{BooksError, Result};

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
