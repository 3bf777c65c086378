//! HTTP layer for the access-control REST API.

pub mod fetcher;
pub mod rest;

pub use fetcher::{DEFAULT_ITEMS_POINTER, HttpFetcher, extract_items};
pub use rest::{RestClient, RestConfig};
