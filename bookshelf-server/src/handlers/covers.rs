use axum::{
    Json,
    extract::{Path, State},
};
use bookshelf_core::covers::CoverFetchError;
use bookshelf_model::{Book, BookCover, BookID, BookWithCovers, CoversStatus};
use tracing::warn;

use crate::{AppError, AppResult, AppState, handlers::parse_book_id};

async fn load_book(state: &AppState, id: BookID) -> AppResult<Book> {
    state
        .books
        .get_book(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Book {id} not found")))
}

/// Book details plus every cover the cover service could deliver.
///
/// A cancelled download round still answers 200: `coversStatus` is
/// `partial` when some covers arrived first and `unavailable` when none
/// did.
pub async fn get_book_with_covers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookWithCovers>> {
    let id = parse_book_id(&id)?;
    let book = load_book(&state, id).await?;

    let response = match state.covers.fetch_all(&book.id).await {
        Ok(covers) => BookWithCovers::new(book, covers, CoversStatus::Complete),
        Err(CoverFetchError::AggregateCancelled(aggregate)) => {
            let status = if aggregate.retained.is_empty() {
                CoversStatus::Unavailable
            } else {
                CoversStatus::Partial
            };
            warn!(
                book_id = %book.id,
                cause = %aggregate.cause,
                retained = aggregate.retained.len(),
                "Serving book with incomplete covers"
            );
            BookWithCovers::new(book, aggregate.retained, status)
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(response))
}

pub async fn get_book_cover(
    State(state): State<AppState>,
    Path((id, cover_id)): Path<(String, String)>,
) -> AppResult<Json<BookCover>> {
    let id = parse_book_id(&id)?;
    load_book(&state, id).await?;

    state
        .covers
        .fetch_cover(&cover_id)
        .await
        .map(Json)
        .ok_or_else(|| {
            AppError::not_found(format!("Cover {cover_id} not available"))
        })
}
