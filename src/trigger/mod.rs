//! Trigger: the side-effecting write that starts an operation.
//!
//! A trigger performs exactly one network write and returns as soon as the
//! backend acknowledges it. It never waits for the downstream effect; that is
//! the poller's job.

pub mod message;

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Operation, OperationHandle};
use crate::error::{PollError, Result};

pub use message::error_message;

/// HTTP verb used for the write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WriteMethod {
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMethod::Post => write!(f, "POST"),
            WriteMethod::Patch => write!(f, "PATCH"),
            WriteMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// One write to submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRequest {
    pub method: WriteMethod,
    /// Where the write goes
    pub target: String,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Resource to observe for completion; defaults to `target`
    pub observe: Option<String>,
    /// Correlation token carried onto the Operation
    pub correlation: Option<String>,
}

impl TriggerRequest {
    pub fn new(method: WriteMethod, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            body: None,
            observe: None,
            correlation: None,
        }
    }

    pub fn patch(target: impl Into<String>, body: Value) -> Self {
        Self::new(WriteMethod::Patch, target).with_body(body)
    }

    pub fn post(target: impl Into<String>, body: Value) -> Self {
        Self::new(WriteMethod::Post, target).with_body(body)
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(WriteMethod::Delete, target)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn observing(mut self, resource: impl Into<String>) -> Self {
        self.observe = Some(resource.into());
        self
    }

    pub fn with_correlation(mut self, token: impl Into<String>) -> Self {
        self.correlation = Some(token.into());
        self
    }

    /// Resource the poller should watch
    pub fn observed_resource(&self) -> &str {
        self.observe.as_deref().unwrap_or(&self.target)
    }

    /// Operation record for an acknowledged write
    pub fn to_operation(&self) -> Operation {
        let op = Operation::new(self.observed_resource());
        match &self.correlation {
            Some(token) => op.with_correlation(token.clone()),
            None => op,
        }
    }
}

/// Issues side-effecting writes
#[async_trait]
pub trait Trigger: Send + Sync {
    /// Perform the write; `Rejected` on non-2xx, `Transport` on network failure
    async fn submit(&self, request: &TriggerRequest) -> Result<OperationHandle>;
}

/// Scripted outcome for a `ScriptedTrigger`
#[derive(Debug, Clone)]
pub enum TriggerReply {
    Accept,
    Reject { status: u16, message: String },
    Fail(String),
}

/// In-memory trigger that records submissions and answers with a fixed reply
pub struct ScriptedTrigger {
    reply: TriggerReply,
    submitted: Mutex<Vec<TriggerRequest>>,
}

impl ScriptedTrigger {
    pub fn new(reply: TriggerReply) -> Self {
        Self {
            reply,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(TriggerReply::Accept)
    }

    /// Requests submitted so far
    pub fn submitted(&self) -> Vec<TriggerRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Trigger for ScriptedTrigger {
    async fn submit(&self, request: &TriggerRequest) -> Result<OperationHandle> {
        self.submitted.lock().unwrap().push(request.clone());
        match &self.reply {
            TriggerReply::Accept => Ok(request.to_operation()),
            TriggerReply::Reject { status, message } => Err(PollError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            TriggerReply::Fail(msg) => Err(PollError::Transport(msg.clone())),
        }
    }
}
