//! Maps a poll outcome onto the caller-facing `Result`.
//!
//! `Exhausted` is always an error. It is never reported as success, and the
//! timeout carries the last snapshot for diagnostics.

use log::warn;
use serde::Serialize;

use crate::domain::{PollOutcome, PollSession, ResourceSnapshot};
use crate::error::{PollError, Result};

/// Successful completion of an awaited operation
#[derive(Debug, Clone)]
pub struct Completion<T> {
    /// Snapshot in which the matching item appeared
    pub snapshot: ResourceSnapshot<T>,
    /// The item the predicate accepted
    pub item: T,
    /// Number of fetches it took
    pub attempts: u32,
}

/// Convert a bare outcome; `attempts` is the number of fetches made
pub fn report_outcome<T: Serialize>(outcome: PollOutcome<T>, attempts: u32) -> Result<Completion<T>> {
    match outcome {
        PollOutcome::Matched { snapshot, item } => Ok(Completion {
            snapshot,
            item,
            attempts,
        }),
        PollOutcome::Exhausted { last_snapshot } => {
            let snapshot = serde_json::to_value(&last_snapshot).unwrap_or_else(|e| {
                warn!("Could not record last snapshot of {}: {}", last_snapshot.resource, e);
                serde_json::Value::Null
            });
            Err(PollError::Timeout {
                resource: last_snapshot.resource.clone(),
                attempts,
                last_snapshot: snapshot,
            })
        }
        PollOutcome::TransportError(e) => Err(e),
        PollOutcome::Cancelled => Err(PollError::Cancelled),
    }
}

/// Convert a finished session
pub fn report<T: Serialize>(session: PollSession<T>) -> Result<Completion<T>> {
    let attempts = session.attempts.len() as u32;
    report_outcome(session.outcome, attempts)
}
