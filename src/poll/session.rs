//! Poll sessions running on their own tokio task.
//!
//! A `SessionHandle` is acquired when the session starts and released when
//! the session reaches a terminal outcome or is cancelled. Dropping the
//! handle before the session finishes cancels it at the next checkpoint.

use std::sync::Arc;

use futures::future::join_all;
use log::debug;
use tokio::task::JoinHandle;

use super::cancel::{CancelHandle, cancel_pair};
use super::fetcher::Fetcher;
use super::poller::Poller;
use super::predicate::Predicate;
use crate::domain::{PollOutcome, PollSession};
use crate::error::{PollError, Result};
use crate::id::generate_operation_id;

/// Owner of a running poll session
pub struct SessionHandle<T> {
    id: String,
    resource: String,
    cancel: CancelHandle,
    join: Option<JoinHandle<PollSession<T>>>,
}

impl<T> SessionHandle<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Withdraw interest; the session stops at its next checkpoint
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Handle that can cancel this session from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }

    /// Wait for the session and return its full record. Dropping the
    /// returned future before it resolves cancels the session.
    pub async fn join(mut self) -> Result<PollSession<T>> {
        let Some(join) = self.join.as_mut() else {
            return Err(PollError::Join(format!("session {} already joined", self.id)));
        };
        let joined = join.await;
        // finished; nothing left for Drop to cancel
        self.join = None;
        joined.map_err(|e| PollError::Join(e.to_string()))
    }

    /// Wait for the session and return only its outcome
    pub async fn outcome(self) -> Result<PollOutcome<T>> {
        self.join().await.map(|session| session.outcome)
    }
}

impl<T> Drop for SessionHandle<T> {
    fn drop(&mut self) {
        if self.join.is_some() {
            debug!("Session {} released before completion, cancelling", self.id);
            self.cancel.cancel();
        }
    }
}

/// Start polling `resource` on a new task
pub fn spawn_session<F, P>(poller: Arc<Poller<F>>, resource: impl Into<String>, predicate: P) -> SessionHandle<F::Item>
where
    F: Fetcher + 'static,
    P: Predicate<F::Item> + 'static,
{
    let id = generate_operation_id();
    let resource = resource.into();
    let (cancel, signal) = cancel_pair();

    debug!("Spawning poll session {} for {}", id, resource);
    let task_resource = resource.clone();
    let join = tokio::spawn(async move { poller.run(&task_resource, &predicate, &signal).await });

    SessionHandle {
        id,
        resource,
        cancel,
        join: Some(join),
    }
}

/// Await many independent sessions concurrently, preserving input order
pub async fn wait_all<T>(handles: Vec<SessionHandle<T>>) -> Vec<Result<PollSession<T>>> {
    join_all(handles.into_iter().map(SessionHandle::join)).await
}
