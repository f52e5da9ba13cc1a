//! Authenticated Assembla API client.
//!
//! [`ApiClient`] turns an [`ApiRequest`] produced by the resource tree into a
//! full HTTP request: it resolves the access token, composes the URL, encodes
//! the payload and hands the result to the configured [`Transport`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::{CredentialStore, Credentials, TokenData};
use crate::clients::errors::RequestError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::transport::Transport;
use crate::config::{AssemblaConfig, VERSION_ID};
use crate::error::ConfigError;
use crate::rest::{ApiRequest, Dispatcher, Payload};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client for the Assembla REST API.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync` and is shared behind an [`Arc`] by every
/// resource node.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use assembla_api::{ApiClient, AssemblaConfig, HttpMethod, MemoryStore, Payload, ReqwestTransport};
///
/// let client = ApiClient::new(
///     AssemblaConfig::default(),
///     Arc::new(ReqwestTransport::new()),
///     Arc::new(MemoryStore::new()),
/// );
///
/// let me = client.request("user", &Payload::new(), HttpMethod::Get).await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    config: AssemblaConfig,
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    default_headers: HashMap<String, String>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client from its configuration, transport and credential store.
    #[must_use]
    pub fn new(
        config: AssemblaConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let credentials = Credentials::new(
            store,
            Arc::clone(&transport),
            config.token_refresher().cloned(),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Assembla API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            config,
            transport,
            credentials,
            default_headers,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &AssemblaConfig {
        &self.config
    }

    /// Returns the credentials backing this client.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the headers sent with every API request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL for a resource path, without query string.
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        format!(
            "{}/{VERSION_ID}/{path}{}",
            self.config.url_base(),
            self.config.response_suffix().unwrap_or_default()
        )
    }

    /// Sends an authenticated request for `path`.
    ///
    /// A non-empty payload becomes the query parameters for GET and the JSON
    /// body for every other method. An empty payload is not sent at all.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Unauthorized`] if no usable token is available
    /// - [`RequestError::Response`] for failure statuses and for bodies
    ///   reporting `error`
    /// - [`RequestError::Network`] / [`RequestError::Decode`] for transport
    ///   and decoding failures
    pub async fn request(
        &self,
        path: &str,
        payload: &Payload,
        method: HttpMethod,
    ) -> Result<Value, RequestError> {
        let token = self.credentials.access_token().await?;
        let access_token = token.access_token.unwrap_or_default();

        let mut builder = HttpRequest::builder(method, self.resource_url(path))
            .header("Authorization", format!("Bearer {access_token}"));
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if !payload.is_empty() {
            builder = if method == HttpMethod::Get {
                builder.query(payload.to_query_pairs())
            } else {
                builder.body(Value::from(payload.clone()))
            };
        }

        let request = builder.build()?;
        if request.query.is_some() {
            tracing::debug!(
                %method,
                url = %request.url,
                query = %payload.to_query_string(),
                "sending API request"
            );
        } else {
            tracing::debug!(%method, url = %request.url, "sending API request");
        }

        self.transport.fetch_json(request).await
    }

    /// Returns stored token data, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Storage`] if the credential store fails.
    pub async fn get_token(&self) -> Result<Option<Value>, RequestError> {
        self.credentials.get_token().await
    }

    /// Stores token data with a fresh expiry and returns what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Storage`] if the credential store fails.
    pub async fn store_token(&self, token: &TokenData) -> Result<TokenData, RequestError> {
        self.credentials.store_token(token).await
    }

    /// Resolves the avatar URL of `user_id` through the avatar loader endpoint.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Config`] if no avatar loader is configured
    /// - [`RequestError::Unauthorized`] if no usable token is available
    /// - [`RequestError::Response`] if the loader answers with a failure status
    pub async fn get_avatar_url(&self, user_id: &str) -> Result<String, RequestError> {
        let token = self.credentials.access_token().await?;
        let loader = self
            .config
            .avatar_loader()
            .ok_or(ConfigError::MissingAvatarLoader)?;

        let access_token = token.access_token.unwrap_or_default();
        let user_id = urlencoding::encode(user_id);
        let access_token = urlencoding::encode(&access_token);
        let url = loader.fill(&[(":userId", &user_id), (":accessToken", &access_token)]);

        let request = HttpRequest::builder(HttpMethod::Get, url).build()?;
        let response = self.transport.send(request).await?;
        response.check_status()?;

        Ok(response.body)
    }
}

#[async_trait]
impl Dispatcher for ApiClient {
    async fn dispatch(&self, request: ApiRequest) -> Result<Value, RequestError> {
        self.request(&request.path, &request.payload, request.method)
            .await
    }
}
