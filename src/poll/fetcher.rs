//! Snapshot source abstraction
//!
//! The poller only depends on "a document containing zero or more classifiable
//! sub-items". Anything that can produce a `ResourceSnapshot` is a Fetcher.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::ResourceSnapshot;
use crate::error::{PollError, Result};

/// Reads the current state of a resource
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Sub-item type the predicate classifies
    type Item: Clone + Send + Sync + 'static;

    /// Fetch a fresh snapshot of `resource`
    async fn fetch(&self, resource: &str) -> Result<ResourceSnapshot<Self::Item>>;
}

/// One scripted fetch response
#[derive(Debug, Clone)]
pub enum ScriptStep<T> {
    Items(Vec<T>),
    Fail(String),
}

/// In-memory fetcher that replays a fixed script, for tests and dry runs.
///
/// Once the script runs out the last step is repeated.
pub struct ScriptedFetcher<T> {
    steps: Mutex<VecDeque<ScriptStep<T>>>,
    last: Mutex<Option<ScriptStep<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> ScriptedFetcher<T> {
    pub fn new(steps: Vec<ScriptStep<T>>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A fetcher that always returns the same items
    pub fn constant(items: Vec<T>) -> Self {
        Self::new(vec![ScriptStep::Items(items)])
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> ScriptStep<T> {
        let mut steps = self.steps.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match steps.pop_front() {
            Some(step) => {
                *last = Some(step.clone());
                step
            }
            None => last.clone().unwrap_or(ScriptStep::Items(Vec::new())),
        }
    }
}

#[async_trait]
impl<T> Fetcher for ScriptedFetcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch(&self, resource: &str) -> Result<ResourceSnapshot<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.next_step() {
            ScriptStep::Items(items) => Ok(ResourceSnapshot::new(resource, items)),
            ScriptStep::Fail(msg) => Err(PollError::Transport(msg)),
        }
    }
}
