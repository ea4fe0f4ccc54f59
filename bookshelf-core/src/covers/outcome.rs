use std::{fmt, time::Duration};

use bookshelf_model::BookCover;

use super::error::RemoteCallError;

/// How one download ended.
#[derive(Debug)]
pub enum FetchOutcome {
    Succeeded(BookCover),
    /// The remote call failed. This download tripped (or tried to trip) the
    /// shared cancellation signal.
    FailedSoft(RemoteCallError),
    /// A sibling tripped the signal before this download finished.
    AbortedByCancellation,
}

impl FetchOutcome {
    pub fn state(&self) -> TerminalState {
        match self {
            Self::Succeeded(_) => TerminalState::Succeeded,
            Self::FailedSoft(_) => TerminalState::FailedSoft,
            Self::AbortedByCancellation => TerminalState::AbortedByCancellation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalState {
    Succeeded,
    FailedSoft,
    AbortedByCancellation,
    /// The task never produced an outcome (it panicked, or was aborted
    /// while the orchestrator unwound an unexpected fault).
    Incomplete,
}

impl TerminalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::FailedSoft => "failed",
            Self::AbortedByCancellation => "aborted",
            Self::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub index: usize,
    pub cover_id: String,
    pub state: TerminalState,
    pub elapsed: Duration,
    pub error: Option<String>,
}

/// Whole milliseconds for log fields, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
