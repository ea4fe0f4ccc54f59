use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use bookshelf_model::{BookDto, BookForCreation};
use tracing::info;

use crate::{
    AppError, AppResult, AppState,
    handlers::parse_book_id,
    routes::paths::{self, replace_param},
};

pub async fn list_books(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.books.list_books().await?;
    Ok(Json(books.into_iter().map(BookDto::from).collect()))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDto>> {
    let id = parse_book_id(&id)?;
    let book = state
        .books
        .get_book(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Book {id} not found")))?;
    Ok(Json(BookDto::from(book)))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookForCreation>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload?;
    let book = state.books.add_book(request).await?;
    info!(book_id = %book.id, title = %book.title, "Book created");

    let location = replace_param(paths::BOOK, "id", &book.id.to_string());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookDto::from(book)),
    ))
}
