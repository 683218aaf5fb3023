//! autobot.tf price list client
//!
//! Fetches the full price list as a single JSON envelope. The client performs
//! exactly one request per call and never retries.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::PriceListResponse;

/// Default base URL of the autobot.tf API
pub const AUTOBOT_BASE_URL: &str = "https://autobot.tf";

/// Path of the array-shaped price list endpoint
const PRICELIST_PATH: &str = "/json/pricelist-array";

/// Errors that can occur when the price list request itself fails
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed (connection, timeout, non-2xx status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse price list response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Source of the raw upstream price list
#[async_trait]
pub trait PriceListFetcher: Send + Sync {
    /// Fetches the price list envelope
    ///
    /// A well-formed envelope with `success == false` is returned as `Ok`;
    /// only transport level failures are errors.
    async fn fetch_price_list(&self) -> Result<PriceListResponse, UpstreamError>;
}

/// Client for fetching the price list from autobot.tf
#[derive(Debug, Clone)]
pub struct AutobotClient {
    client: Client,
    base_url: String,
}

impl Default for AutobotClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AutobotClient {
    /// Create a new AutobotClient pointing at the public API
    pub fn new() -> Self {
        Self::with_base_url(AUTOBOT_BASE_URL)
    }

    /// Create a new AutobotClient against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a new AutobotClient with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn pricelist_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), PRICELIST_PATH)
    }
}

#[async_trait]
impl PriceListFetcher for AutobotClient {
    async fn fetch_price_list(&self) -> Result<PriceListResponse, UpstreamError> {
        let url = self.pricelist_url();

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let price_list: PriceListResponse = serde_json::from_str(&text)?;

        tracing::info!(
            url = %url,
            success = price_list.success,
            items = price_list.items.len(),
            "fetched price list from autobot.tf"
        );
        Ok(price_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned HTTP response and returns the base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    /// Client that bypasses any proxy configured in the environment
    fn local_client(base_url: String) -> AutobotClient {
        let http = Client::builder().no_proxy().build().unwrap();
        AutobotClient::with_client(http, base_url)
    }

    #[test]
    fn test_default_points_at_autobot() {
        let client = AutobotClient::default();
        assert_eq!(client.pricelist_url(), "https://autobot.tf/json/pricelist-array");
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = AutobotClient::with_base_url("http://localhost:8080/");
        assert_eq!(
            client.pricelist_url(),
            "http://localhost:8080/json/pricelist-array"
        );
    }

    #[tokio::test]
    async fn test_fetch_decodes_envelope() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"success":true,"items":[{"sku":"5021;6","buy":{"keys":0,"metal":60}}]}"#,
        )
        .await;

        let client = local_client(base_url);
        let response = client.fetch_price_list().await.unwrap();

        assert!(response.success);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].sku, "5021;6");
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_is_not_an_error() {
        let base_url = serve_once("HTTP/1.1 200 OK", r#"{"success":false,"items":[]}"#).await;

        let client = local_client(base_url);
        let response = client.fetch_price_list().await.unwrap();

        assert!(!response.success);
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_transport_error() {
        let base_url = serve_once("HTTP/1.1 502 Bad Gateway", "{}").await;

        let client = local_client(base_url);
        let result = client.fetch_price_list().await;

        assert!(matches!(result, Err(UpstreamError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let base_url = serve_once("HTTP/1.1 200 OK", "not json").await;

        let client = local_client(base_url);
        let result = client.fetch_price_list().await;

        assert!(matches!(result, Err(UpstreamError::ParseError(_))));
    }
}
