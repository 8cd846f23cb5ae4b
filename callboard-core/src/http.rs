//! HTTP client abstraction for outbound calls to external services.
//!
//! The campaign runner is reached over HTTP. Going through this trait keeps
//! the runner testable without a network: tests substitute an implementation
//! that records the request instead of sending it.
//!
//! The default implementation wraps reqwest.

use async_trait::async_trait;
use reqwest;
use serde_json::Value;
use crate::Error;

/// A generic trait for making JSON HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON to `url` and return the response text.
    /// Non-2xx statuses are errors.
    async fn post_json(&self, url: String, body: Value) -> Result<String, Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn post_json(&self, url: String, body: Value) -> Result<String, Error> {
        let response = self.client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(response)
    }
}
