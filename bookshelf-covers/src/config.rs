use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_FAULT_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MIN_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverServiceConfig {
    /// How long a faulted request waits before answering 500.
    pub fault_delay: Duration,
    /// Inclusive lower bound of the payload size.
    pub min_bytes: usize,
    /// Exclusive upper bound of the payload size.
    pub max_bytes: usize,
}

impl Default for CoverServiceConfig {
    fn default() -> Self {
        Self {
            fault_delay: DEFAULT_FAULT_DELAY,
            min_bytes: DEFAULT_MIN_BYTES,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoverServiceConfigError {
    #[error("min_bytes ({min}) must not exceed max_bytes ({max})")]
    InvertedSizeRange { min: usize, max: usize },
}

impl CoverServiceConfig {
    pub fn validate(&self) -> Result<(), CoverServiceConfigError> {
        if self.min_bytes > self.max_bytes {
            return Err(CoverServiceConfigError::InvertedSizeRange {
                min: self.min_bytes,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}
