use bookshelf_model::BookID;
pub use bookshelf_model::{DEFAULT_COVER_COUNT, DEFAULT_FAULT_TARGET};

/// One outbound cover request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    /// Zero-based position of this request within its plan.
    pub index: usize,
    pub cover_id: String,
    /// Ask the cover service to answer with a server error.
    pub return_fault: bool,
}

impl FetchTarget {
    pub fn new(index: usize, cover_id: impl Into<String>) -> Self {
        Self {
            index,
            cover_id: cover_id.into(),
            return_fault: false,
        }
    }

    pub fn with_fault(mut self, return_fault: bool) -> Self {
        self.return_fault = return_fault;
        self
    }
}

/// Derives the cover requests for a book.
///
/// Cover ids are `"{book_id}-dummycover{k}"` for `k` in `1..=count`. When a
/// fault target is set, that request (1-based) carries `returnFault=true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPlan {
    count: usize,
    fault_target: Option<usize>,
}

impl Default for TargetPlan {
    fn default() -> Self {
        Self {
            count: DEFAULT_COVER_COUNT,
            fault_target: DEFAULT_FAULT_TARGET,
        }
    }
}

impl TargetPlan {
    /// A plan without fault injection. `count` is raised to at least one.
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            fault_target: None,
        }
    }

    pub fn with_fault_target(mut self, fault_target: Option<usize>) -> Self {
        self.fault_target = fault_target.filter(|target| *target > 0);
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn fault_target(&self) -> Option<usize> {
        self.fault_target
    }

    pub fn targets(&self, book_id: &BookID) -> Vec<FetchTarget> {
        (0..self.count)
            .map(|index| {
                let number = index + 1;
                FetchTarget::new(index, format!("{book_id}-dummycover{number}"))
                    .with_fault(self.fault_target == Some(number))
            })
            .collect()
    }
}
