use anyhow::{Context, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::errors::{SyncError, SyncResult};

/// HTTP client that only speaks JSON and refuses non-2xx answers
#[derive(Clone)]
pub struct JsonClient {
    client: Client,
}

impl JsonClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get_json(&self, url: &str) -> SyncResult<Value> {
        let response = self.send_get_request(url).await?;
        let response = Self::ensure_success(url, response).await?;
        let text = response.text().await.map_err(|source| SyncError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&text)
            .map_err(|e| SyncError::decode(format!("response from {}", url), e))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> SyncResult<Response> {
        self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| SyncError::Request {
                url: url.to_string(),
                source,
            })
    }

    async fn ensure_success(url: &str, response: Response) -> SyncResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SyncError::remote_fetch(url, status.as_u16(), &body))
    }
}
