//! HTTP-backed `Fetcher`
//!
//! GETs the resource and pulls its sub-items out of the JSON document with a
//! JSON pointer. A missing items field is an empty snapshot, not an error.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::rest::RestClient;
use crate::domain::ResourceSnapshot;
use crate::error::Result;
use crate::poll::Fetcher;

/// Default location of the sub-item list in a cardholder document
pub const DEFAULT_ITEMS_POINTER: &str = "/cards";

/// Fetches snapshots of `T` items over HTTP
pub struct HttpFetcher<T> {
    client: Arc<RestClient>,
    items_pointer: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpFetcher<T> {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self::with_pointer(client, DEFAULT_ITEMS_POINTER)
    }

    pub fn with_pointer(client: Arc<RestClient>, items_pointer: impl Into<String>) -> Self {
        Self {
            client,
            items_pointer: items_pointer.into(),
            _item: PhantomData,
        }
    }

    pub fn items_pointer(&self) -> &str {
        &self.items_pointer
    }
}

/// Decode the items under `pointer`. Items that do not decode are skipped.
pub fn extract_items<T: DeserializeOwned>(document: &Value, pointer: &str) -> Vec<T> {
    let Some(Value::Array(raw)) = document.pointer(pointer) else {
        return Vec::new();
    };

    raw.iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Skipping item {} at {}: {}", index, pointer, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl<T> Fetcher for HttpFetcher<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch(&self, resource: &str) -> Result<ResourceSnapshot<T>> {
        let document = self.client.get_json(resource).await?;
        Ok(ResourceSnapshot::new(resource, extract_items(&document, &self.items_pointer)))
    }
}
