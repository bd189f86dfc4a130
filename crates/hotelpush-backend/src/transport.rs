//! HTTP transport used by the registrar and the trigger requester.
//!
//! The [`Transport`] trait is the seam between the notification logic and
//! the network, so the logic can be exercised against recorded responses.

use async_trait::async_trait;

/// Errors produced while talking to the remote server.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-2xx status and an empty body.
    #[error("server returned HTTP {0} without a body")]
    Status(u16),
}

/// Minimal HTTP client surface the backend needs.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Issues a GET and returns the response body as text.
    async fn get_text(&self, url: &str) -> Result<String, TransportError>;

    /// Issues a POST with a JSON body and returns the response body as text.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<String, TransportError>;
}

/// [`Transport`] over a shared `reqwest` client. No timeout is configured
/// here; the client's defaults apply.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// Reads the body of a response. A non-2xx response is only an error when it
/// carries nothing to interpret.
async fn read_body(response: reqwest::Response) -> Result<String, TransportError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() && body.trim().is_empty() {
        return Err(TransportError::Status(status.as_u16()));
    }
    Ok(body)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?;
        read_body(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<String, TransportError> {
        let response = self.client.post(url).json(body).send().await?;
        read_body(response).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        assert_eq!(
            TransportError::Status(503).to_string(),
            "server returned HTTP 503 without a body"
        );
    }

    #[test]
    fn request_error_display() {
        let error = reqwest::Client::new().get("://bad").build().unwrap_err();
        let error = TransportError::Request(error);
        assert!(error.to_string().starts_with("HTTP request failed"));
    }

    #[tokio::test]
    async fn unparsable_url_is_a_request_error() {
        let transport = HttpTransport::default();
        let result = transport.get_text("://bad/push?").await;
        assert!(matches!(result, Err(TransportError::Request(_))));
    }
}
