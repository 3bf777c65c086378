//! credpoll - Eventual-completion polling for access-control credentials
//!
//! Turns a fire-and-forget backend write (such as adding a mobile credential
//! to a cardholder) into a bounded, cancellable completion signal by polling
//! the affected resource until a caller-supplied predicate matches.

pub mod client;
pub mod credential;
pub mod domain;
pub mod error;
pub mod id;
pub mod poll;
pub mod trigger;

pub use error::{PollError, Result};
