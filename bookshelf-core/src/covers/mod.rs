//! Concurrent cover downloads.
//!
//! [`CoverOrchestrator::fetch_all`] derives one [`FetchTarget`] per cover
//! from a book id, downloads them concurrently through a [`CoverSource`] and
//! joins every download before returning. All downloads of one call share a
//! single [`CancellationController`]: the first failed download signals it,
//! every sibling still in flight drops its request, and the call reports
//! [`CoverFetchError::AggregateCancelled`] with the covers that had already
//! arrived.

pub mod cancellation;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod orchestrator;
pub mod outcome;
pub mod target;

pub use cancellation::{CancelCause, CancellationController};
pub use error::{CancelledAggregate, CoverFetchError, RemoteCallError};
pub use fetcher::{CoverSource, fetch_one};
pub use http::HttpCoverSource;
pub use orchestrator::CoverOrchestrator;
pub use outcome::{FetchOutcome, FetchReport, TerminalState};
pub use target::{FetchTarget, TargetPlan};
