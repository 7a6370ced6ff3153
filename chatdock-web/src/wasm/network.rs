//! `fetch` transport for chat messages

use async_trait::async_trait;
use chatdock_core::{ChatRequest, ChatTransport, TransportError, TransportResponse};
use gloo_net::http::Request;
use tracing::{debug, warn};

/// Same-origin or CORS `fetch` POST with a JSON body.
pub(super) struct FetchTransport;

#[async_trait(?Send)]
impl ChatTransport for FetchTransport {
    async fn post(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, TransportError> {
        let body =
            serde_json::to_string(request).map_err(|err| TransportError::Encode(err.to_string()))?;

        let response = Request::post(endpoint)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|err| TransportError::network(endpoint, err))?
            .send()
            .await
            .map_err(|err| TransportError::network(endpoint, err))?;

        let status = response.status();
        // An unreadable body renders like an empty one
        let body = response.text().await.unwrap_or_else(|err| {
            warn!(status, error = %err, "Failed to read chat response body");
            String::new()
        });
        debug!(status, bytes = body.len(), "Chat endpoint responded");
        Ok(TransportResponse::new(status, body))
    }
}
