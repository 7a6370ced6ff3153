//! `reqwest` transport for the chat endpoint

use async_trait::async_trait;
use chatdock_core::{ChatRequest, ChatTransport, TransportError, TransportResponse};
use reqwest::Client;
use tracing::{debug, warn};

/// POSTs chat messages, resolving relative endpoints against `base_url`.
#[derive(Clone)]
pub struct ReqwestTransport {
    pub base_url: String,
    pub http: Client,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Absolute endpoints pass through; paths are joined onto the base URL.
    pub fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait(?Send)]
impl ChatTransport for ReqwestTransport {
    async fn post(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.build_url(endpoint);
        debug!(url = %url, "Posting chat message");

        // Error statuses are rendered by the dispatcher, so no error_for_status here
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::network(&url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_else(|e| {
            warn!(status, error = %e, "Failed to read chat response body");
            String::new()
        });
        Ok(TransportResponse::new(status, body))
    }
}
