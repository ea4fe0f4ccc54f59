pub mod paths;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    handlers::{authors, books, collections, covers, health},
};

/// Create the API router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(paths::HEALTH, get(health::health))
        .route(
            paths::BOOKS,
            get(books::list_books).post(books::create_book),
        )
        .route(paths::BOOK, get(books::get_book))
        .route(paths::BOOK_COVERS, get(covers::get_book_with_covers))
        .route(paths::BOOK_COVER, get(covers::get_book_cover))
        .route(
            paths::BOOK_COLLECTIONS,
            post(collections::create_book_collection),
        )
        .route(paths::BOOK_COLLECTION, get(collections::get_book_collection))
        .route(paths::AUTHORS, get(authors::list_authors))
}
