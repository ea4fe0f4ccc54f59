use std::fmt;

use async_trait::async_trait;
use bookshelf_model::BookCover;
use tracing::{debug, warn};

use super::{
    cancellation::{CancelCause, CancellationController},
    error::RemoteCallError,
    outcome::FetchOutcome,
    target::FetchTarget,
};

/// Transport used to download a single cover.
///
/// Implementations must be cancel safe: dropping the returned future has to
/// abandon the request.
#[async_trait]
pub trait CoverSource: Send + Sync + fmt::Debug {
    async fn download(
        &self,
        target: &FetchTarget,
    ) -> Result<BookCover, RemoteCallError>;
}

/// Download one cover while watching the shared cancellation signal.
///
/// A failed download trips `controller` and yields
/// [`FetchOutcome::FailedSoft`]. If the signal is already tripped, or trips
/// while the request is in flight, the request is dropped and the result is
/// [`FetchOutcome::AbortedByCancellation`].
pub async fn fetch_one(
    source: &dyn CoverSource,
    target: &FetchTarget,
    controller: &CancellationController,
) -> FetchOutcome {
    if controller.is_cancelled() {
        debug!(
            cover_id = %target.cover_id,
            "Skipping cover download, already cancelled"
        );
        return FetchOutcome::AbortedByCancellation;
    }

    let result = tokio::select! {
        biased;
        _ = controller.cancelled() => {
            debug!(
                cover_id = %target.cover_id,
                "Cover download abandoned after sibling failure"
            );
            return FetchOutcome::AbortedByCancellation;
        }
        result = source.download(target) => result,
    };

    match result {
        Ok(cover) => FetchOutcome::Succeeded(cover),
        Err(err) => {
            let cause = CancelCause {
                index: target.index,
                cover_id: target.cover_id.clone(),
                reason: err.to_string(),
            };
            if controller.cancel(cause) {
                warn!(
                    cover_id = %target.cover_id,
                    error = %err,
                    "Cover download failed, cancelling sibling downloads"
                );
            } else {
                debug!(
                    cover_id = %target.cover_id,
                    error = %err,
                    "Cover download failed after cancellation was already signalled"
                );
            }
            FetchOutcome::FailedSoft(err)
        }
    }
}
