//! Trigger-then-poll workflow.
//!
//! Submits the write, then polls the operation's resource until completion.
//! A rejected or failed write is surfaced straight away with no polling.

use log::info;
use serde::Serialize;

use super::cancel::CancelSignal;
use super::fetcher::Fetcher;
use super::poller::Poller;
use super::predicate::Predicate;
use super::report::{Completion, report};
use crate::domain::Operation;
use crate::error::Result;
use crate::trigger::{Trigger, TriggerRequest};

/// Completion of a triggered operation
#[derive(Debug, Clone)]
pub struct IssuedOperation<T> {
    pub operation: Operation,
    pub completion: Completion<T>,
}

/// Submit `request` through `trigger`, then wait for `predicate` to match on
/// the observed resource.
pub async fn await_completion<Tr, F, P>(
    trigger: &Tr,
    poller: &Poller<F>,
    request: &TriggerRequest,
    predicate: &P,
    cancel: &CancelSignal,
) -> Result<IssuedOperation<F::Item>>
where
    Tr: Trigger + ?Sized,
    F: Fetcher,
    F::Item: Serialize,
    P: Predicate<F::Item> + ?Sized,
{
    let operation = trigger.submit(request).await?;
    info!(
        "Operation {} acknowledged ({} {}), awaiting completion on {}",
        operation.id, request.method, request.target, operation.resource
    );

    let session = poller.run(&operation.resource, predicate, cancel).await;
    let completion = report(session)?;

    info!(
        "Operation {} completed after {} attempt(s)",
        operation.id, completion.attempts
    );
    Ok(IssuedOperation { operation, completion })
}
