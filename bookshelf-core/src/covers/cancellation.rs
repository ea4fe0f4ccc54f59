use std::{
    fmt,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// The failure that tripped a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelCause {
    /// Zero-based index of the target whose download failed.
    pub index: usize,
    pub cover_id: String,
    pub reason: String,
}

impl fmt::Display for CancelCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cover request #{} ({}) failed: {}",
            self.index + 1,
            self.cover_id,
            self.reason
        )
    }
}

#[derive(Debug, Default)]
struct Shared {
    token: CancellationToken,
    cause: OnceLock<CancelCause>,
    requests: AtomicUsize,
}

/// One-shot cancellation signal shared by the downloads of a single
/// [`fetch_all`](super::CoverOrchestrator::fetch_all) call.
///
/// The signal is monotonic: once tripped it stays tripped, and only the
/// first [`cancel`](Self::cancel) records a cause. Clones share the same
/// signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationController {
    shared: Arc<Shared>,
}

impl CancellationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the signal. Returns `true` only for the call that performed the
    /// transition; later calls are counted but change nothing.
    pub fn cancel(&self, cause: CancelCause) -> bool {
        self.shared.requests.fetch_add(1, Ordering::AcqRel);
        if self.shared.cause.set(cause).is_err() {
            return false;
        }
        self.shared.token.cancel();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.token.is_cancelled()
    }

    /// Resolves once the signal has been tripped.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.shared.token.cancelled()
    }

    pub fn cause(&self) -> Option<&CancelCause> {
        self.shared.cause.get()
    }

    /// Number of `cancel` calls made against this controller.
    pub fn signal_requests(&self) -> usize {
        self.shared.requests.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause(index: usize) -> CancelCause {
        CancelCause {
            index,
            cover_id: format!("cover-{index}"),
            reason: "status 500".into(),
        }
    }

    #[test]
    fn only_first_cancel_transitions() {
        let controller = CancellationController::new();
        assert!(!controller.is_cancelled());

        assert!(controller.cancel(cause(1)));
        assert!(!controller.cancel(cause(3)));
        assert!(!controller.cancel(cause(1)));

        assert!(controller.is_cancelled());
        assert_eq!(controller.cause(), Some(&cause(1)));
        assert_eq!(controller.signal_requests(), 3);
    }

    #[test]
    fn clones_share_the_signal() {
        let controller = CancellationController::new();
        let clone = controller.clone();

        clone.cancel(cause(0));

        assert!(controller.is_cancelled());
        assert_eq!(controller.cause().map(|c| c.index), Some(0));
        assert_eq!(controller.signal_requests(), 1);
    }

    #[test]
    fn fresh_controllers_are_independent() {
        let first = CancellationController::new();
        first.cancel(cause(0));

        let second = CancellationController::new();
        assert!(!second.is_cancelled());
        assert!(second.cause().is_none());
    }

    #[tokio::test]
    async fn waiters_wake_on_cancel() {
        let controller = CancellationController::new();
        let waiting = controller.clone();

        let waiter = tokio::spawn(async move {
            waiting.cancelled().await;
            waiting.cause().map(|c| c.cover_id.clone())
        });

        tokio::task::yield_now().await;
        controller.cancel(cause(4));

        assert_eq!(waiter.await.unwrap().as_deref(), Some("cover-4"));
    }

    #[test]
    fn cause_renders_one_based_request_number() {
        assert_eq!(
            cause(1).to_string(),
            "cover request #2 (cover-1) failed: status 500"
        );
    }
}
