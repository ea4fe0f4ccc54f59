use axum::{Json, extract::State};
use bookshelf_model::Author;

use crate::{AppResult, AppState};

pub async fn list_authors(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Author>>> {
    Ok(Json(state.books.list_authors().await?))
}
