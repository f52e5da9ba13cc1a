//! The `Assembla` entry point.

use std::sync::Arc;

use serde_json::Value;

use crate::auth::{CredentialStore, MemoryStore, TokenData};
use crate::clients::{ApiClient, ReqwestTransport, RequestError, Transport};
use crate::config::AssemblaConfig;
use crate::rest::{Dispatcher, ResourceNode, ResourceTree, UsageError};

/// Client for the Assembla API.
///
/// Owns the resource tree, the HTTP client and the credentials. One instance
/// is meant to live for the whole process; see
/// [`ResourceNode`](crate::rest::ResourceNode) for the concurrency contract.
///
/// # Example
///
/// ```rust,ignore
/// use assembla_api::{Assembla, AssemblaConfig, TokenData};
///
/// let api = Assembla::new(
///     AssemblaConfig::builder()
///         .token_refresher("https://app.example.com/refresh/:refreshToken")
///         .build()?,
/// );
///
/// api.store_token(&TokenData::new(access, refresh)).await?;
/// let me = api.users().find("me")?.read()?.await?;
/// ```
#[derive(Debug)]
pub struct Assembla {
    client: Arc<ApiClient>,
    tree: ResourceTree,
}

impl Assembla {
    /// Creates a client with the default transport and an in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the default HTTP client cannot be created, see
    /// [`ReqwestTransport::new`].
    #[must_use]
    pub fn new(config: AssemblaConfig) -> Self {
        Self::builder(config).build()
    }

    /// Returns a builder for swapping the transport or the credential store.
    #[must_use]
    pub fn builder(config: AssemblaConfig) -> AssemblaBuilder {
        AssemblaBuilder::new(config)
    }

    /// Returns the `users` resource.
    #[must_use]
    pub fn users(&self) -> &ResourceNode {
        self.tree.users()
    }

    /// Returns the `spaces` resource.
    #[must_use]
    pub fn spaces(&self) -> &ResourceNode {
        self.tree.spaces()
    }

    /// Returns a root resource by name or camelCase alias.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownResource`] if there is no such resource.
    pub fn resource(&self, name: &str) -> Result<&ResourceNode, UsageError> {
        self.tree.resource(name)
    }

    /// Returns the resource tree.
    #[must_use]
    pub const fn tree(&self) -> &ResourceTree {
        &self.tree
    }

    /// Returns the underlying API client.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AssemblaConfig {
        self.client.config()
    }

    /// Returns the raw stored token data, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Storage`] if the credential store fails.
    pub async fn get_token(&self) -> Result<Option<Value>, RequestError> {
        self.client.get_token().await
    }

    /// Stores a token pair obtained by the application, stamping its expiry.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Storage`] if the credential store fails.
    pub async fn store_token(&self, token: &TokenData) -> Result<TokenData, RequestError> {
        self.client.store_token(token).await
    }

    /// Resolves a user's avatar URL through the configured avatar loader.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_avatar_url`].
    pub async fn get_avatar_url(&self, user_id: &str) -> Result<String, RequestError> {
        self.client.get_avatar_url(user_id).await
    }

    /// Returns the URL where a user grants an authorization code to `client_id`.
    #[must_use]
    pub fn get_code_request_url(&self, client_id: &str) -> String {
        self.config().code_request_url(client_id)
    }
}

/// Builder for [`Assembla`].
#[derive(Debug)]
pub struct AssemblaBuilder {
    config: AssemblaConfig,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn CredentialStore>>,
}

impl AssemblaBuilder {
    /// Creates a builder using `config`.
    #[must_use]
    pub const fn new(config: AssemblaConfig) -> Self {
        Self {
            config,
            transport: None,
            store: None,
        }
    }

    /// Sets the HTTP transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the credential store.
    #[must_use]
    pub fn storage(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the client.
    ///
    /// # Panics
    ///
    /// Panics if no transport was set and the default HTTP client cannot be
    /// created, see [`ReqwestTransport::new`].
    #[must_use]
    pub fn build(self) -> Assembla {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()) as Arc<dyn Transport>);
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn CredentialStore>);

        let client = Arc::new(ApiClient::new(self.config, transport, store));
        let dispatcher: Arc<dyn Dispatcher> = client.clone();

        Assembla {
            client,
            tree: ResourceTree::new(dispatcher),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UrlBase;

    #[test]
    fn test_code_request_url_uses_configured_base() {
        let config = AssemblaConfig::builder()
            .url_base(UrlBase::new("http://localhost:8080///").unwrap())
            .build()
            .unwrap();
        let api = Assembla::new(config);

        assert_eq!(
            api.get_code_request_url("qwe123"),
            "http://localhost:8080/authorization?response_type=code&client_id=qwe123"
        );
    }

    #[test]
    fn test_resources_are_exposed() {
        let api = Assembla::new(AssemblaConfig::default());

        assert_eq!(api.users().name(), "users");
        assert_eq!(api.spaces().name(), "spaces");
        assert!(std::ptr::eq(api.resource("spaces").unwrap(), api.spaces()));
    }

    #[tokio::test]
    async fn test_token_round_trip_through_custom_store() {
        let store = Arc::new(MemoryStore::new());
        let api = Assembla::builder(AssemblaConfig::default())
            .storage(store.clone())
            .build();

        api.store_token(&TokenData::new("123", "456")).await.unwrap();

        let raw = store
            .get(crate::auth::TOKEN_STORAGE_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw["accessToken"], "123");
        assert_eq!(api.get_token().await.unwrap(), Some(raw));
    }
}
