//! Operation record
//!
//! An Operation identifies one asynchronous side effect in flight: the write
//! has been accepted, but the backend has not yet finished applying it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_operation_id;

/// One tracked side-effecting request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier ("op-<uuid>")
    pub id: String,

    /// Resource whose state reflects completion (href or URL)
    pub resource: String,

    /// When the trigger was acknowledged
    pub submitted_at: DateTime<Utc>,

    /// Caller-defined token used to tell concurrent identical operations apart
    pub correlation: Option<String>,
}

impl Operation {
    /// Create a new operation targeting `resource`, submitted now
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            id: generate_operation_id(),
            resource: resource.into(),
            submitted_at: Utc::now(),
            correlation: None,
        }
    }

    /// Attach a correlation token
    pub fn with_correlation(mut self, token: impl Into<String>) -> Self {
        self.correlation = Some(token.into());
        self
    }
}

/// Handle returned by a successful trigger
pub type OperationHandle = Operation;
