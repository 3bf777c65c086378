//! Poll session outcome types.
//!
//! This module defines the terminal results of a polling session.

use super::attempt::PollAttempt;
use super::snapshot::ResourceSnapshot;
use crate::error::PollError;

/// Terminal result of one polling session.
#[derive(Debug)]
pub enum PollOutcome<T> {
    /// An item satisfied the predicate; no further fetches were made
    Matched {
        snapshot: ResourceSnapshot<T>,
        item: T,
    },
    /// Every attempt fetched successfully but nothing matched
    Exhausted { last_snapshot: ResourceSnapshot<T> },
    /// A fetch failed; never retried as "not yet"
    TransportError(PollError),
    /// Caller cancelled between attempts
    Cancelled,
}

impl<T> PollOutcome<T> {
    pub fn state(&self) -> SessionState {
        match self {
            PollOutcome::Matched { .. } => SessionState::Matched,
            PollOutcome::Exhausted { .. } => SessionState::Exhausted,
            PollOutcome::TransportError(_) => SessionState::TransportError,
            PollOutcome::Cancelled => SessionState::Cancelled,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, PollOutcome::Matched { .. })
    }

    /// The matched item, if any
    pub fn matched_item(&self) -> Option<&T> {
        match self {
            PollOutcome::Matched { item, .. } => Some(item),
            _ => None,
        }
    }
}

/// Lifecycle of a polling session.
///
/// `NotStarted -> Polling -> {Matched, Exhausted, TransportError, Cancelled}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Polling,
    Matched,
    Exhausted,
    TransportError,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::NotStarted | SessionState::Polling)
    }

    /// Whether `next` is a legal successor of `self`
    pub fn can_transition_to(&self, next: SessionState) -> bool {
        match self {
            SessionState::NotStarted => next == SessionState::Polling,
            SessionState::Polling => next.is_terminal(),
            _ => false,
        }
    }
}

/// A finished session: its outcome plus the attempt history
#[derive(Debug)]
pub struct PollSession<T> {
    pub outcome: PollOutcome<T>,
    pub attempts: Vec<PollAttempt>,
}

impl<T> PollSession<T> {
    /// Number of fetches actually issued
    pub fn fetch_count(&self) -> usize {
        self.attempts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_states() {
        let matched = PollOutcome::Matched {
            snapshot: ResourceSnapshot::new("/r", vec![7]),
            item: 7,
        };
        assert_eq!(matched.state(), SessionState::Matched);
        assert!(matched.is_matched());
        assert_eq!(matched.matched_item(), Some(&7));

        let exhausted: PollOutcome<i32> = PollOutcome::Exhausted {
            last_snapshot: ResourceSnapshot::empty("/r"),
        };
        assert_eq!(exhausted.state(), SessionState::Exhausted);
        assert!(exhausted.matched_item().is_none());

        let transport: PollOutcome<i32> = PollOutcome::TransportError(PollError::Transport("x".into()));
        assert_eq!(transport.state(), SessionState::TransportError);

        let cancelled: PollOutcome<i32> = PollOutcome::Cancelled;
        assert_eq!(cancelled.state(), SessionState::Cancelled);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SessionState::NotStarted.is_terminal());
        assert!(!SessionState::Polling.is_terminal());
        assert!(SessionState::Matched.is_terminal());
        assert!(SessionState::Exhausted.is_terminal());
        assert!(SessionState::TransportError.is_terminal());
        assert!(SessionState::Cancelled.is_terminal());
    }

    #[test]
    fn test_transitions() {
        assert!(SessionState::NotStarted.can_transition_to(SessionState::Polling));
        assert!(!SessionState::NotStarted.can_transition_to(SessionState::Matched));
        assert!(SessionState::Polling.can_transition_to(SessionState::Cancelled));
        assert!(!SessionState::Polling.can_transition_to(SessionState::Polling));
        // terminal states never go back to polling
        assert!(!SessionState::Matched.can_transition_to(SessionState::Polling));
        assert!(!SessionState::Exhausted.can_transition_to(SessionState::Polling));
    }
}
