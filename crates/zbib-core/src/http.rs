//! HTTP transport abstraction
//!
//! The translation client only needs "POST a JSON body, get status and
//! body back". Keeping that behind a trait lets tests script responses
//! without a network; [`ReqwestTransport`] is the production impl.

use crate::error::Error;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Status and body of an HTTP response, as the client interprets them
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Minimal POST-only HTTP transport
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, Error>;
}

/// reqwest-backed transport with a fixed request timeout
pub struct ReqwestTransport {
    client: Client,
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: format!("zbib/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, Error> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.user_agent)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
