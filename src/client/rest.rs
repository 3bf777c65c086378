//! REST client for the access-control API
//!
//! A thin wrapper around reqwest that:
//! - Sends `Authorization: GGL-API-KEY <key>` and `Accept: application/json`
//! - Resolves relative hrefs against the configured base URL
//! - Optionally accepts self-signed server certificates
//! - Maps failures onto `PollError`

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use serde_json::Value;

use crate::domain::OperationHandle;
use crate::error::{PollError, Result};
use crate::trigger::{Trigger, TriggerRequest, WriteMethod, error_message};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for `RestClient`
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub base_url: String,
    pub api_key: String,
    /// Accept self-signed server certificates
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8904/".to_string(),
            api_key: String::new(),
            accept_invalid_certs: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// Authenticated HTTP client
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(config: &RestConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PollError::Config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("GGL-API-KEY {}", config.api_key))
            .map_err(|e| PollError::Config(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| PollError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute hrefs are used as-is; anything else is joined onto the base URL
    pub fn resolve(&self, href: &str) -> Result<Url> {
        self.base_url
            .join(href)
            .map_err(|e| PollError::Config(format!("Cannot resolve '{}': {}", href, e)))
    }

    /// GET a JSON document. Non-2xx and non-JSON bodies are transport errors.
    pub async fn get_json(&self, href: &str) -> Result<Value> {
        let url = self.resolve(href)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PollError::Transport(format!(
                "GET {} returned {}: {}",
                url,
                status,
                error_message(&status.to_string(), &body)
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| PollError::Transport(format!("GET {} returned invalid JSON: {}", url, e)))
    }

    /// Perform one write. 2xx is success and the body is ignored.
    pub async fn write(&self, method: WriteMethod, href: &str, body: Option<&Value>) -> Result<()> {
        let url = self.resolve(href)?;
        debug!("{} {}", method, url);

        let verb = match method {
            WriteMethod::Post => Method::POST,
            WriteMethod::Patch => Method::PATCH,
            WriteMethod::Delete => Method::DELETE,
        };
        let mut request = self.client.request(verb, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(PollError::Rejected {
            status: status.as_u16(),
            message: error_message(&status.to_string(), &text),
        })
    }
}

#[async_trait]
impl Trigger for RestClient {
    async fn submit(&self, request: &TriggerRequest) -> Result<OperationHandle> {
        self.write(request.method, &request.target, request.body.as_ref()).await?;
        let operation = request.to_operation();
        debug!("{} {} accepted as {}", request.method, request.target, operation.id);
        Ok(operation)
    }
}
