use bookshelf_model::BookCover;
use reqwest::StatusCode;
use thiserror::Error;

use super::{cancellation::CancelCause, outcome::FetchReport};

/// Why a single cover download failed.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("cover service answered {status}")]
    Status { status: StatusCode },

    #[error("cover request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cover payload could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cannot build a cover request from base URL {0}")]
    InvalidEndpoint(String),
}

/// A `fetch_all` call that was cut short by a failed download.
#[derive(Debug)]
pub struct CancelledAggregate {
    pub cause: CancelCause,
    /// Terminal state of every target, ordered by target index.
    pub reports: Vec<FetchReport>,
    /// Covers that finished downloading before the signal, ordered by
    /// target index.
    pub retained: Vec<BookCover>,
}

#[derive(Debug, Error)]
pub enum CoverFetchError {
    #[error("cover downloads cancelled: {}", .0.cause)]
    AggregateCancelled(CancelledAggregate),

    /// A download task died without producing an outcome. Siblings still
    /// running at that point were aborted.
    #[error("cover download task for {cover_id} failed unexpectedly")]
    Unexpected {
        index: usize,
        cover_id: String,
        reports: Vec<FetchReport>,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl CoverFetchError {
    pub fn reports(&self) -> &[FetchReport] {
        match self {
            Self::AggregateCancelled(aggregate) => &aggregate.reports,
            Self::Unexpected { reports, .. } => reports,
        }
    }
}
