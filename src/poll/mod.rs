//! Eventual-completion polling
//!
//! This module provides:
//! - Fetcher trait for reading resource snapshots
//! - Predicate trait for recognising a completed operation
//! - Poller with a bounded, fixed-interval policy
//! - Explicit cancellation and task-backed sessions
//! - The reporter mapping outcomes to `Result`
//! - The trigger-then-poll workflow

pub mod cancel;
pub mod fetcher;
pub mod issue;
pub mod policy;
pub mod poller;
pub mod predicate;
pub mod report;
pub mod session;

pub use cancel::{CancelHandle, CancelSignal, cancel_pair};
pub use fetcher::{Fetcher, ScriptStep, ScriptedFetcher};
pub use issue::{IssuedOperation, await_completion};
pub use policy::{DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, PollPolicy};
pub use poller::Poller;
pub use predicate::{And, Predicate, PredicateExt, first_match};
pub use report::{Completion, report, report_outcome};
pub use session::{SessionHandle, spawn_session, wait_all};
