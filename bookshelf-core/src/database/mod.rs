//! Book persistence.
//!
//! [`ports::books::BooksRepository`] is the seam the HTTP layer depends on.
//! PostgreSQL backs it in production; the in-memory store serves development
//! without a database and the HTTP tests.

pub mod ports;
pub mod repositories;
pub mod seed;

#[cfg(feature = "database")]
pub mod postgres;

#[cfg(feature = "database")]
pub use postgres::PostgresDatabase;
pub use repositories::in_memory::InMemoryBooksRepository;
#[cfg(feature = "database")]
pub use repositories::postgres_books::PostgresBooksRepository;
