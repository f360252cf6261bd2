use async_trait::async_trait;

use crate::error::TransportError;

/// Outcome of one HTTP exchange, success or not.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub success: bool,
    pub status: u16,
    pub body: String,
}

/// Seam between the session and the network. `Err` means the exchange
/// itself failed (connect, timeout); an HTTP error status comes back as a
/// reply with `success == false` so the caller can report the body.
#[async_trait]
pub trait TransportClient: Send + Sync {
    async fn send(
        &self,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<TransportReply, TransportError>;
}

/// reqwest-backed transport for the chat completions endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn send(
        &self,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<TransportReply, TransportError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(TransportReply {
            success: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}
