use std::str::FromStr;

use axum::{
    Json,
    extract::{FromRequestParts, Path, State, rejection::JsonRejection},
    http::{StatusCode, header, request::Parts},
    response::IntoResponse,
};
use bookshelf_model::{BookDto, BookForCreation, BookID};
use tracing::info;

use crate::{
    AppError, AppResult, AppState,
    routes::paths::{self, replace_param},
};

/// Book ids bound from a `(id1,id2,...)` path segment. Surrounding
/// parentheses are optional; duplicates are dropped, keeping first
/// occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookIds(pub Vec<BookID>);

impl FromStr for BookIds {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let mut ids: Vec<BookID> = Vec::new();
        for part in inner.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let id: BookID = part.parse().map_err(|_| {
                AppError::bad_request(format!("Invalid book id: {part}"))
            })?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(AppError::bad_request("No book ids given"));
        }
        Ok(Self(ids))
    }
}

impl BookIds {
    /// Render as the `(id1,id2,...)` path segment this type parses.
    pub fn to_segment(&self) -> String {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("({joined})")
    }
}

impl<S> FromRequestParts<S> for BookIds
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        raw.parse()
    }
}

pub async fn get_book_collection(
    State(state): State<AppState>,
    ids: BookIds,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.books.get_books(&ids.0).await?;
    if books.len() != ids.0.len() {
        return Err(AppError::not_found(format!(
            "{} of {} requested books not found",
            ids.0.len() - books.len(),
            ids.0.len()
        )));
    }
    Ok(Json(books.into_iter().map(BookDto::from).collect()))
}

pub async fn create_book_collection(
    State(state): State<AppState>,
    payload: Result<Json<Vec<BookForCreation>>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(requests) = payload?;
    if requests.is_empty() {
        return Err(AppError::bad_request(
            "Collection must contain at least one book",
        ));
    }

    let books = state.books.add_books(requests).await?;
    info!(count = books.len(), "Book collection created");

    let ids = BookIds(books.iter().map(|book| book.id).collect());
    let location =
        replace_param(paths::BOOK_COLLECTION, "ids", &ids.to_segment());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(books.into_iter().map(BookDto::from).collect::<Vec<_>>()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const A: &str = "5b1c2b4d-48c7-402a-80c3-cc796ad49c6b";
    const B: &str = "d173e20d-159e-4127-9ce9-b0ac2564ad97";

    fn id(raw: &str) -> BookID {
        BookID(Uuid::parse_str(raw).unwrap())
    }

    #[test]
    fn parses_parenthesised_list() {
        let ids: BookIds = format!("({A}, {B})").parse().unwrap();
        assert_eq!(ids, BookIds(vec![id(A), id(B)]));
    }

    #[test]
    fn parentheses_are_optional_and_duplicates_dropped() {
        let ids: BookIds = format!("{B},{A},{B}").parse().unwrap();
        assert_eq!(ids, BookIds(vec![id(B), id(A)]));
    }

    #[test]
    fn rejects_malformed_and_empty_lists() {
        let err = "(not-a-uuid)".parse::<BookIds>().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let err = "()".parse::<BookIds>().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn segment_round_trips() {
        let ids = BookIds(vec![id(A), id(B)]);
        assert_eq!(ids.to_segment(), format!("({A},{B})"));
        assert_eq!(ids.to_segment().parse::<BookIds>().unwrap(), ids);
    }
}
