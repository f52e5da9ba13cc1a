//! Access token resolution.
//!
//! [`Credentials`] owns the credential store and, when a token refresher is
//! configured, exchanges the refresh token for a new token pair whenever the
//! stored access token has expired.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::auth::storage::CredentialStore;
use crate::auth::token::{TokenData, TOKEN_STORAGE_KEY};
use crate::clients::{HttpMethod, HttpRequest, RequestError, Transport};
use crate::config::UrlPattern;

/// Reads, stores and refreshes token data.
pub struct Credentials {
    store: Arc<dyn CredentialStore>,
    transport: Arc<dyn Transport>,
    refresher: Option<UrlPattern>,
    refresh_lock: Mutex<()>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("store", &self.store)
            .field("refresher", &self.refresher)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Creates credentials over `store`.
    ///
    /// `transport` is only used to call the `refresher` endpoint.
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        transport: Arc<dyn Transport>,
        refresher: Option<UrlPattern>,
    ) -> Self {
        Self {
            store,
            transport,
            refresher,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the raw token data held by the store.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Storage`] if the store fails.
    pub async fn get_token(&self) -> Result<Option<Value>, RequestError> {
        Ok(self.store.get(TOKEN_STORAGE_KEY).await?)
    }

    /// Stores `token` with a fresh expiry and returns what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Storage`] if the store fails, or
    /// [`RequestError::Decode`] if the store hands back something that is not
    /// token data.
    pub async fn store_token(&self, token: &TokenData) -> Result<TokenData, RequestError> {
        let stamped = token.stamped_at(Utc::now());
        tracing::debug!(expires = ?stamped.expires, "storing token data");
        let stored = self
            .store
            .set(TOKEN_STORAGE_KEY, serde_json::to_value(&stamped)?)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Resolves token data fit for an API call.
    ///
    /// Without a refresher the stored data is returned as is. With one, a
    /// still-valid token gets its expiry pushed forward and an expired one is
    /// exchanged through the refresher endpoint. Concurrent callers share a
    /// single refresh.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Unauthorized`] if no complete token pair is
    /// stored (before or after a refresh), and whatever the store or the
    /// refresher call fails with.
    pub async fn access_token(&self) -> Result<TokenData, RequestError> {
        let Some(refresher) = &self.refresher else {
            return self.load_complete().await;
        };

        let _guard = self.refresh_lock.lock().await;
        let current = self.load_complete().await?;

        if !current.is_expired_at(Utc::now()) {
            return self.store_token(&current).await;
        }

        let refresh_token =
            urlencoding::encode(current.refresh_token.as_deref().unwrap_or_default());
        let url = refresher.fill(&[(":refreshToken", &refresh_token)]);
        tracing::debug!("refreshing expired access token");

        let request = HttpRequest::builder(HttpMethod::Get, url).build()?;
        let body = self.transport.fetch_json(request).await?;
        let refreshed: TokenData = serde_json::from_value(body)?;

        if !refreshed.is_complete() {
            tracing::warn!("token refresher answered without a complete token pair");
            return Err(RequestError::Unauthorized);
        }

        self.store_token(&refreshed).await
    }

    async fn load_complete(&self) -> Result<TokenData, RequestError> {
        let token = self
            .get_token()
            .await?
            .and_then(|value| serde_json::from_value::<TokenData>(value).ok())
            .filter(TokenData::is_complete);

        token.ok_or(RequestError::Unauthorized)
    }
}
