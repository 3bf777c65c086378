//! Domain types for credpoll
//!
//! This module contains the core polling vocabulary:
//! - Operation: one asynchronous side effect being tracked
//! - ResourceSnapshot: an immutable fetched view of a resource
//! - PollAttempt: one iteration of a session
//! - PollOutcome / SessionState: terminal results and the session lifecycle

pub mod attempt;
pub mod operation;
pub mod outcome;
pub mod snapshot;

pub use attempt::{FetchResult, PollAttempt};
pub use operation::{Operation, OperationHandle};
pub use outcome::{PollOutcome, PollSession, SessionState};
pub use snapshot::ResourceSnapshot;
