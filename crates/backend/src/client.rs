//! HTTP execution against the signing API.

use crate::error::{BackendError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request header carrying the API key on every backend call.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Backend resource, each with a fixed path under the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Template,
    Placeholder,
    Contract,
}

impl Resource {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Template => "/template",
            Self::Placeholder => "/placeholder",
            Self::Contract => "/contract",
        }
    }
}

/// Thin client for the signing API.
///
/// One instance is shared across tool calls; it holds no per-call state
/// beyond reqwest's connection pool. Every call is a single POST with no
/// retries.
#[derive(Debug, Clone)]
pub struct SigningClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl SigningClient {
    /// Build a client for `base_url`, applying `timeout` to every request.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Config` if `base_url` is not a valid URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|e| BackendError::Config(format!("Invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            timeout,
        })
    }

    #[must_use]
    pub fn endpoint(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), resource.path())
    }

    /// Issue a single POST against `resource` and return the parsed JSON
    /// response body.
    ///
    /// # Errors
    ///
    /// Returns `Http` on a non-2xx status (carrying the status code and raw
    /// body), or `Transport` on connection/timeout failures and on a
    /// success body that is not JSON.
    pub async fn post(&self, resource: Resource, api_key: &str, body: &Value) -> Result<Value> {
        let endpoint = self.endpoint(resource);
        debug!(endpoint = %endpoint, "issuing backend request");

        let response = self
            .http
            .post(endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| BackendError::Transport(format!("invalid JSON response: {e}")))
    }
}
