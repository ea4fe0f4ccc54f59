//! # Bookshelf Server
//!
//! axum HTTP API over [`bookshelf_core`]: book CRUD, bulk collections, and
//! a book-with-covers view backed by the concurrent cover orchestrator.

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use app::create_app;
pub use infra::app_state::AppState;
pub use infra::errors::{AppError, AppResult};
