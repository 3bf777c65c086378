//! Per-attempt records kept for diagnostics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a single fetch produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchResult {
    /// Fetch succeeded with this many sub-items
    Snapshot { items: usize },
    /// Fetch failed; session ends after this attempt
    Failed { error: String },
}

/// One iteration of a poll session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAttempt {
    /// 0-based, contiguous within a session
    pub sequence: u32,
    pub fetch: FetchResult,
    /// Whether any item satisfied the predicate
    pub matched: bool,
    /// Time since the session started, measured after the fetch returned
    pub elapsed: Duration,
}

impl PollAttempt {
    pub fn fetched(sequence: u32, items: usize, matched: bool, elapsed: Duration) -> Self {
        Self {
            sequence,
            fetch: FetchResult::Snapshot { items },
            matched,
            elapsed,
        }
    }

    pub fn failed(sequence: u32, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            sequence,
            fetch: FetchResult::Failed { error: error.into() },
            matched: false,
            elapsed,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.fetch, FetchResult::Failed { .. })
    }
}
