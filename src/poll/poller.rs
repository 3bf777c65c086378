//! Bounded, fixed-interval poller.
//!
//! Each attempt:
//! 1. Checks for cancellation
//! 2. Fetches a fresh snapshot (a fetch error ends the session)
//! 3. Applies the predicate to every item, first match wins
//! 4. Sleeps for the interval if attempts remain, racing the cancel signal
//!
//! Fetches within a session are strictly sequential. Independent sessions
//! share nothing and can run concurrently.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::time::Instant;

use super::cancel::CancelSignal;
use super::fetcher::Fetcher;
use super::policy::PollPolicy;
use super::predicate::{Predicate, first_match};
use crate::domain::{PollAttempt, PollOutcome, PollSession, ResourceSnapshot};

/// Poller drives one or more sessions against a shared fetcher
pub struct Poller<F: Fetcher> {
    fetcher: Arc<F>,
    policy: PollPolicy,
}

impl<F: Fetcher> Poller<F> {
    /// Create a poller with the default policy (10 attempts, 500ms)
    pub fn new(fetcher: Arc<F>) -> Self {
        Self::with_policy(fetcher, PollPolicy::default())
    }

    pub fn with_policy(fetcher: Arc<F>, policy: PollPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    pub fn fetcher(&self) -> &Arc<F> {
        &self.fetcher
    }

    /// Poll `resource` until the predicate matches, attempts run out, a fetch
    /// fails, or `cancel` fires.
    pub async fn poll<P>(&self, resource: &str, predicate: &P, cancel: &CancelSignal) -> PollOutcome<F::Item>
    where
        P: Predicate<F::Item> + ?Sized,
    {
        self.run(resource, predicate, cancel).await.outcome
    }

    /// Like `poll`, but also returns the attempt history.
    pub async fn run<P>(&self, resource: &str, predicate: &P, cancel: &CancelSignal) -> PollSession<F::Item>
    where
        P: Predicate<F::Item> + ?Sized,
    {
        let max_attempts = self.policy.max_attempts();
        let interval = self.policy.interval();
        let started = Instant::now();
        let mut attempts = Vec::new();
        let mut last_snapshot: Option<ResourceSnapshot<F::Item>> = None;

        debug!(
            "Polling {} (max_attempts={}, interval={:?})",
            resource, max_attempts, interval
        );

        for sequence in 0..max_attempts {
            if cancel.is_cancelled() {
                info!("Polling {} cancelled before attempt {}", resource, sequence);
                return PollSession {
                    outcome: PollOutcome::Cancelled,
                    attempts,
                };
            }

            let fetched = self.fetcher.fetch(resource).await;
            let elapsed = started.elapsed();

            let snapshot = match fetched {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Fetch of {} failed on attempt {}: {}", resource, sequence, e);
                    attempts.push(PollAttempt::failed(sequence, e.to_string(), elapsed));
                    return PollSession {
                        outcome: PollOutcome::TransportError(e),
                        attempts,
                    };
                }
            };

            let hit = first_match(&snapshot.items, predicate);
            attempts.push(PollAttempt::fetched(sequence, snapshot.len(), hit.is_some(), elapsed));
            tracing::debug!(
                resource = %resource,
                attempt = sequence,
                items = snapshot.len(),
                matched = hit.is_some(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Poll attempt"
            );

            if let Some(index) = hit {
                info!("Polling {} matched on attempt {} after {:?}", resource, sequence, elapsed);
                let item = snapshot.items[index].clone();
                return PollSession {
                    outcome: PollOutcome::Matched { snapshot, item },
                    attempts,
                };
            }

            last_snapshot = Some(snapshot);

            if sequence + 1 < max_attempts {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = cancel.cancelled() => {
                        info!("Polling {} cancelled while waiting after attempt {}", resource, sequence);
                        return PollSession {
                            outcome: PollOutcome::Cancelled,
                            attempts,
                        };
                    }
                }
            }
        }

        warn!(
            "Polling {} exhausted {} attempts after {:?}",
            resource,
            max_attempts,
            started.elapsed()
        );
        PollSession {
            outcome: PollOutcome::Exhausted {
                last_snapshot: last_snapshot.unwrap_or_else(|| ResourceSnapshot::empty(resource)),
            },
            attempts,
        }
    }
}
