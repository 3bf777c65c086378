//! Error types for credpoll
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while triggering or polling an operation
#[derive(Debug, Error)]
pub enum PollError {
    /// Network failure, or a non-2xx response to a fetch
    #[error("Transport error: {0}")]
    Transport(String),

    /// The trigger write was refused by the backend
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Attempt budget exhausted without a matching item
    #[error("Timed out after {attempts} attempts waiting on {resource}")]
    Timeout {
        resource: String,
        attempts: u32,
        last_snapshot: serde_json::Value,
    },

    /// Caller withdrew interest before the session finished
    #[error("Polling cancelled")]
    Cancelled,

    /// Invalid policy or configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Session task panicked or was aborted
    #[error("Session task failed: {0}")]
    Join(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PollError {
    /// Whether this error belongs to the transport class
    pub fn is_transport(&self) -> bool {
        matches!(self, PollError::Transport(_))
    }
}

impl From<reqwest::Error> for PollError {
    fn from(e: reqwest::Error) -> Self {
        PollError::Transport(e.to_string())
    }
}

/// Result type alias for credpoll operations
pub type Result<T> = std::result::Result<T, PollError>;
