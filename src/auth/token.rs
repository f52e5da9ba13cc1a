//! Token data persisted in the credential store.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Key under which token data is kept in the credential store.
pub const TOKEN_STORAGE_KEY: &str = "__assemblaApiTokenData";

/// Access tokens expire after 899 seconds; one second of slack is kept.
pub const ACCESS_TOKEN_LIFETIME_MS: i64 = 898_000;

/// OAuth token pair plus its expiry.
///
/// Serialized in camelCase so that stores shared with other Assembla clients
/// read the same shape: `{ "accessToken", "refreshToken", "expires" }`,
/// where `expires` is a Unix timestamp in milliseconds.
///
/// # Example
///
/// ```rust
/// use assembla_api::auth::TokenData;
///
/// let token = TokenData::new("access", "refresh");
/// assert!(token.is_complete());
/// assert!(token.expires.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    /// The bearer token sent with API requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// The token exchanged for a new access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Expiry of the access token, in Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}

impl TokenData {
    /// Creates token data without an expiry.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            expires: None,
        }
    }

    /// Returns `true` if both tokens are present and non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let present = |token: &Option<String>| token.as_deref().is_some_and(|t| !t.is_empty());
        present(&self.access_token) && present(&self.refresh_token)
    }

    /// Returns `true` unless `expires` lies after `now`.
    ///
    /// Token data without an expiry counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires
            .map_or(true, |expires| expires <= now.timestamp_millis())
    }

    /// Returns a copy whose access token expires a full lifetime after `now`.
    #[must_use]
    pub fn stamped_at(&self, now: DateTime<Utc>) -> Self {
        let expires = now + Duration::milliseconds(ACCESS_TOKEN_LIFETIME_MS);
        Self {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires: Some(expires.timestamp_millis()),
        }
    }
}
