//! Configuration types for the Assembla API client.
//!
//! This module provides the configuration used to initialize the client:
//!
//! - [`AssemblaConfig`]: The configuration struct holding all client settings
//! - [`AssemblaConfigBuilder`]: A builder for constructing [`AssemblaConfig`] instances
//! - [`UrlBase`]: A validated API base URL
//! - [`UrlPattern`]: A URL template with `:name` placeholders
//!
//! Configuration is instance-based. Pointing the client at a private
//! installation means building a config with a different [`UrlBase`].
//!
//! # Example
//!
//! ```rust
//! use assembla_api::{AssemblaConfig, UrlBase};
//!
//! let config = AssemblaConfig::builder()
//!     .url_base(UrlBase::new("https://assembla.example.com").unwrap())
//!     .token_refresher("https://app.example.com/refresh/:refreshToken")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.url_base().as_ref(), "https://assembla.example.com");
//! ```

mod newtypes;

pub use newtypes::{UrlBase, UrlPattern};

use crate::error::ConfigError;

/// API version segment prepended to every resource path.
pub const VERSION_ID: &str = "v1";

/// Default API host.
pub const URL_BASE: &str = "https://api.assemb.la";

/// Path of the OAuth authorization-code request, relative to the URL base.
pub const CODE_REQUEST_PATH_PATTERN: &str = "/authorization?response_type=code&client_id=:clientId";

/// Placeholders understood by the avatar loader pattern.
pub const AVATAR_LOADER_PLACEHOLDERS: &[&str] = &[":userId", ":accessToken"];

/// Placeholders understood by the token refresher pattern.
pub const TOKEN_REFRESHER_PLACEHOLDERS: &[&str] = &[":refreshToken"];

/// Configuration for the Assembla API client.
///
/// # Endpoints
///
/// - The avatar loader endpoint receives `:userId` and `:accessToken` and
///   must answer with a plain-text avatar URL.
/// - The token refresher endpoint receives `:refreshToken` and must answer
///   with JSON `{ "accessToken": "...", "refreshToken": "..." }`.
///
/// Without a token refresher, stored tokens are used until the API rejects them.
#[derive(Clone, Debug)]
pub struct AssemblaConfig {
    url_base: UrlBase,
    avatar_loader: Option<UrlPattern>,
    token_refresher: Option<UrlPattern>,
    response_suffix: Option<String>,
    user_agent_prefix: Option<String>,
}

impl AssemblaConfig {
    /// Creates a new builder for constructing an `AssemblaConfig`.
    #[must_use]
    pub fn builder() -> AssemblaConfigBuilder {
        AssemblaConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn url_base(&self) -> &UrlBase {
        &self.url_base
    }

    /// Returns the avatar loader pattern, if configured.
    #[must_use]
    pub const fn avatar_loader(&self) -> Option<&UrlPattern> {
        self.avatar_loader.as_ref()
    }

    /// Returns the token refresher pattern, if configured.
    #[must_use]
    pub const fn token_refresher(&self) -> Option<&UrlPattern> {
        self.token_refresher.as_ref()
    }

    /// Returns the suffix appended to resource paths (e.g. `.json`), if any.
    #[must_use]
    pub fn response_suffix(&self) -> Option<&str> {
        self.response_suffix.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the URL a user is sent to in order to grant an authorization code.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assembla_api::AssemblaConfig;
    ///
    /// let config = AssemblaConfig::default();
    /// assert_eq!(
    ///     config.code_request_url("qwe123"),
    ///     "https://api.assemb.la/authorization?response_type=code&client_id=qwe123"
    /// );
    /// ```
    #[must_use]
    pub fn code_request_url(&self, client_id: &str) -> String {
        let path = CODE_REQUEST_PATH_PATTERN.replacen(":clientId", client_id, 1);
        format!("{}{path}", self.url_base)
    }
}

impl Default for AssemblaConfig {
    fn default() -> Self {
        Self {
            url_base: UrlBase::default(),
            avatar_loader: None,
            token_refresher: None,
            response_suffix: None,
            user_agent_prefix: None,
        }
    }
}

// Verify AssemblaConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AssemblaConfig>();
};

/// Builder for constructing [`AssemblaConfig`] instances.
///
/// All fields are optional.
///
/// # Defaults
///
/// - `url_base`: `https://api.assemb.la`
/// - `avatar_loader`: `None`
/// - `token_refresher`: `None`
/// - `response_suffix`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct AssemblaConfigBuilder {
    url_base: Option<UrlBase>,
    avatar_loader: Option<String>,
    token_refresher: Option<String>,
    response_suffix: Option<String>,
    user_agent_prefix: Option<String>,
}

impl AssemblaConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL, e.g. for a private installation.
    #[must_use]
    pub fn url_base(mut self, url: UrlBase) -> Self {
        self.url_base = Some(url);
        self
    }

    /// Sets the avatar loader pattern (`:userId`, `:accessToken`).
    #[must_use]
    pub fn avatar_loader(mut self, pattern: impl Into<String>) -> Self {
        self.avatar_loader = Some(pattern.into());
        self
    }

    /// Sets the token refresher pattern (`:refreshToken`).
    #[must_use]
    pub fn token_refresher(mut self, pattern: impl Into<String>) -> Self {
        self.token_refresher = Some(pattern.into());
        self
    }

    /// Sets a suffix appended to every composed resource path.
    #[must_use]
    pub fn response_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.response_suffix = Some(suffix.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AssemblaConfig`], validating the URL patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrlPattern`] if a pattern lacks one of
    /// its placeholders.
    pub fn build(self) -> Result<AssemblaConfig, ConfigError> {
        let avatar_loader = self
            .avatar_loader
            .map(|p| UrlPattern::new(p, AVATAR_LOADER_PLACEHOLDERS))
            .transpose()?;
        let token_refresher = self
            .token_refresher
            .map(|p| UrlPattern::new(p, TOKEN_REFRESHER_PLACEHOLDERS))
            .transpose()?;

        Ok(AssemblaConfig {
            url_base: self.url_base.unwrap_or_default(),
            avatar_loader,
            token_refresher,
            response_suffix: self.response_suffix.filter(|s| !s.is_empty()),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = AssemblaConfig::builder().build().unwrap();

        assert_eq!(config.url_base().as_ref(), URL_BASE);
        assert!(config.avatar_loader().is_none());
        assert!(config.token_refresher().is_none());
        assert!(config.response_suffix().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_code_request_url_uses_default_base() {
        let config = AssemblaConfig::default();
        assert_eq!(
            config.code_request_url("qwe123"),
            "https://api.assemb.la/authorization?response_type=code&client_id=qwe123"
        );
    }

    #[test]
    fn test_code_request_url_uses_assigned_base() {
        let config = AssemblaConfig::builder()
            .url_base(UrlBase::new("http://localhost:8080/").unwrap())
            .build()
            .unwrap();
        assert_eq!(
            config.code_request_url("qwe123"),
            "http://localhost:8080/authorization?response_type=code&client_id=qwe123"
        );
    }

    #[test]
    fn test_builder_rejects_refresher_without_placeholder() {
        let result = AssemblaConfig::builder()
            .token_refresher("http://test.com/refresh")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrlPattern {
                placeholder: ":refreshToken",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = AssemblaConfig::builder()
            .url_base(UrlBase::new("https://assembla.example.com").unwrap())
            .avatar_loader("http://host.com/avatars?user_id=:userId&access_token=:accessToken")
            .token_refresher("http://test.com/refresh/:refreshToken")
            .response_suffix(".json")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.url_base().as_ref(), "https://assembla.example.com");
        assert!(config.avatar_loader().is_some());
        assert!(config.token_refresher().is_some());
        assert_eq!(config.response_suffix(), Some(".json"));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_empty_response_suffix_is_ignored() {
        let config = AssemblaConfig::builder()
            .response_suffix("")
            .build()
            .unwrap();
        assert!(config.response_suffix().is_none());
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AssemblaConfig>();
    }
}
