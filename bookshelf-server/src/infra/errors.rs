use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use bookshelf_core::{BooksError, covers::CoverFetchError};
use bookshelf_model::ModelError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

// Convert from various error types
impl From<BooksError> for AppError {
    fn from(err: BooksError) -> Self {
        match err {
            BooksError::NotFound(msg) => Self::not_found(msg),
            BooksError::InvalidInput(msg) => Self::bad_request(msg),
            BooksError::Model(err) => Self::from(err),
            BooksError::Database(msg) => {
                tracing::error!(error = %msg, "database operation failed");
                Self::internal("Database operation failed")
            }
            BooksError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<CoverFetchError> for AppError {
    fn from(err: CoverFetchError) -> Self {
        tracing::error!(
            error = %err,
            reports = ?err.reports(),
            "cover download failed unexpectedly"
        );
        Self::internal("Cover download failed")
    }
}
