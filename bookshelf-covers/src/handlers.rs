use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookshelf_model::BookCover;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::CoverServiceConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverQuery {
    #[serde(default)]
    pub return_fault: bool,
}

pub async fn get_book_cover(
    State(config): State<CoverServiceConfig>,
    Path(name): Path<String>,
    Query(query): Query<CoverQuery>,
) -> Response {
    if query.return_fault {
        info!(
            %name,
            delay = ?config.fault_delay,
            "Serving injected fault"
        );
        tokio::time::sleep(config.fault_delay).await;
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let content = random_content(config.min_bytes, config.max_bytes);
    debug!(%name, bytes = content.len(), "Serving book cover");
    Json(BookCover::new(name, content)).into_response()
}

fn random_content(min_bytes: usize, max_bytes: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    let len = if max_bytes > min_bytes {
        rng.random_range(min_bytes..max_bytes)
    } else {
        min_bytes
    };
    let mut content = vec![0u8; len];
    rng.fill(content.as_mut_slice());
    content
}
