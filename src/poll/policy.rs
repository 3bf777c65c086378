//! Attempt budget and interval for a poll session.

use std::time::Duration;

use crate::error::{PollError, Result};

/// Default number of fetches before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default fixed delay between fetches
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Bounded, fixed-interval polling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl PollPolicy {
    /// Build a policy; `max_attempts` must be at least 1
    pub fn new(max_attempts: u32, interval: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(PollError::Config("max_attempts must be at least 1".to_string()));
        }
        Ok(Self {
            max_attempts,
            interval,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Upper bound on time spent sleeping across a whole session, saturating
    /// at `Duration::MAX`
    pub fn ceiling(&self) -> Duration {
        self.interval.checked_mul(self.max_attempts).unwrap_or(Duration::MAX)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}
