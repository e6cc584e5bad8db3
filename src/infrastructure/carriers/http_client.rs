//! # HTTP Client
//!
//! Thin `reqwest` wrapper used to reach carrier rate endpoints.
//!
//! Provides:
//! - Configurable timeouts
//! - Form-encoded POST with a text response
//! - Mapping of transport failures and HTTP statuses to [`CarrierError`]
//!
//! No retries happen here: a failed call fails the quote attempt.
//!
//! # Examples
//!
//! ```ignore
//! use carrier_rate_quote::infrastructure::carriers::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let xml = client.post_form("https://carrier.example/api", "API=RateV4&XML=...".into()).await?;
//! ```

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::traits::RateTransport;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client wrapper for carrier adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> CarrierResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                CarrierError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// POSTs an already form-encoded body and returns the response text.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout` or `CarrierError::Connection` if the
    /// request fails, or a status-specific error for non-2xx responses.
    pub async fn post_form(&self, url: &str, body: String) -> CarrierResult<String> {
        debug!(url, body_len = body.len(), "posting carrier request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Checks the status and reads the body as text.
    async fn handle_response(&self, response: Response) -> CarrierResult<String> {
        let status = response.status();

        if status.is_success() {
            response.text().await.map_err(|e| {
                CarrierError::protocol_error(format!("Failed to read response: {}", e))
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            warn!(%status, "carrier endpoint returned error status");
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a CarrierError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CarrierError::connection(format!("Connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a CarrierError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> CarrierError {
        match status {
            StatusCode::BAD_REQUEST => {
                CarrierError::invalid_request(format!("Bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CarrierError::authentication(format!("Authentication failed: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => CarrierError::rate_limited("Rate limit exceeded"),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                CarrierError::connection(format!("Server error ({}): {}", status, body))
            }
            _ => CarrierError::protocol_error(format!("HTTP error ({}): {}", status, body)),
        }
    }
}

/// [`RateTransport`] that posts to a fixed carrier endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateTransport {
    client: HttpClient,
    endpoint: String,
}

impl HttpRateTransport {
    /// Creates a transport for the given endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the client cannot be created.
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> CarrierResult<Self> {
        Ok(Self {
            client: HttpClient::new(timeout_ms)?,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RateTransport for HttpRateTransport {
    async fn post(&self, body: String) -> CarrierResult<String> {
        self.client.post_form(&self.endpoint, body).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn transport_posts_to_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rates"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            HttpRateTransport::new(format!("{}/rates", server.uri()), 1000).unwrap();
        assert_eq!(transport.post("API=RateV4".to_string()).await.unwrap(), "ok");
    }

    #[test]
    fn new_client() {
        let client = HttpClient::new(5000);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_ms(), 5000);
    }

    #[tokio::test]
    async fn post_form_returns_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ShippingAPI.dll"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(body_string("API=RateV4&XML=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<RateV4Response/>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let url = format!("{}/ShippingAPI.dll", server.uri());
        let body = client
            .post_form(&url, "API=RateV4&XML=abc".to_string())
            .await
            .unwrap();
        assert_eq!(body, "<RateV4Response/>");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad user"))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let err = client
            .post_form(&server.uri(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CarrierError::Authentication { .. }));
        assert!(err.to_string().contains("bad user"));
    }

    #[tokio::test]
    async fn server_error_maps_to_connection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let err = client
            .post_form(&server.uri(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CarrierError::Connection { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(50).unwrap();
        let err = client
            .post_form(&server.uri(), String::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CarrierError::timeout_with_duration("Request timed out", 50)
        );
    }
}
