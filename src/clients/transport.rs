//! Pluggable HTTP transport.
//!
//! The client never talks to the network directly; it hands fully resolved
//! [`HttpRequest`]s to a [`Transport`]. [`ReqwestTransport`] is the default.
//! Tests and embedders can substitute their own implementation.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::errors::RequestError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;

/// Sends HTTP requests.
///
/// Implementations perform exactly one network round trip per call. Retries
/// and timeouts, if any, belong here rather than in the resource layer.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends a request and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] only when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;

    /// Sends a request and decodes the JSON body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on transport failure, on a non-2xx/304 status,
    /// on an undecodable body, or on a body reporting `error`.
    async fn fetch_json(&self, request: HttpRequest) -> Result<Value, RequestError> {
        let method = request.http_method;
        let url = request.url.clone();

        let response = self.send(request).await?;
        tracing::debug!(%method, %url, status = response.code, "received response");

        response.check_status()?;
        response.json()
    }
}

/// [`Transport`] backed by a [`reqwest::Client`] using rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a fresh rustls-backed client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Creates a transport around an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        request.verify()?;

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let status = res.status();
        let status_text = status.canonical_reason().unwrap_or_default();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(status.as_u16(), status_text, headers, body))
    }
}
