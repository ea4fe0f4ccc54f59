pub mod in_memory;

#[cfg(feature = "database")]
pub mod postgres_books;
