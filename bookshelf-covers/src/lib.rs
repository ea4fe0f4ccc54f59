//! Stand-in for the external cover service.
//!
//! Serves `GET /api/bookcovers/{name}`. Each call returns a cover with a
//! random payload; `?returnFault=true` makes the call wait and then answer
//! `500 Internal Server Error`.

pub mod config;
pub mod handlers;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use config::{CoverServiceConfig, CoverServiceConfigError};

pub const BOOK_COVER_ROUTE: &str = "/api/bookcovers/{name}";

pub fn router(config: CoverServiceConfig) -> Router {
    Router::new()
        .route(BOOK_COVER_ROUTE, get(handlers::get_book_cover))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}
