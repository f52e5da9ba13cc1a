//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use super::URL_BASE;
use crate::error::ConfigError;
use std::fmt;

/// A validated API base URL.
///
/// The URL must carry a scheme and a host. Trailing slashes are removed so
/// that paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use assembla_api::UrlBase;
///
/// let url = UrlBase::new("http://localhost:8080/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlBase {
    url: String,
}

impl UrlBase {
    /// Creates a new validated URL base.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrlBase`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidUrlBase { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidUrlBase { url: url.clone() });
        }

        let host = &url[scheme_end + 3..];
        if host.is_empty() || host.starts_with([':', '/', '?', '#']) {
            return Err(ConfigError::InvalidUrlBase { url: url.clone() });
        }

        Ok(Self { url })
    }
}

impl Default for UrlBase {
    /// The public Assembla API host, [`URL_BASE`].
    fn default() -> Self {
        Self {
            url: URL_BASE.to_string(),
        }
    }
}

impl AsRef<str> for UrlBase {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for UrlBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A URL pattern with `:name` placeholders.
///
/// Used for the avatar loader (`:userId`, `:accessToken`) and the token
/// refresher (`:refreshToken`) endpoints. Substitution is plain string
/// replacement of the first occurrence of each placeholder.
///
/// # Example
///
/// ```rust
/// use assembla_api::UrlPattern;
///
/// let pattern = UrlPattern::new("http://test.com/refresh/:refreshToken", &[":refreshToken"]).unwrap();
/// assert_eq!(pattern.fill(&[(":refreshToken", "abc")]), "http://test.com/refresh/abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlPattern(String);

impl UrlPattern {
    /// Creates a new pattern, checking that every required placeholder is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrlPattern`] naming the first missing placeholder.
    pub fn new(
        pattern: impl Into<String>,
        placeholders: &[&'static str],
    ) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        if let Some(missing) = placeholders.iter().find(|p| !pattern.contains(*p)) {
            return Err(ConfigError::InvalidUrlPattern {
                pattern,
                placeholder: *missing,
            });
        }
        Ok(Self(pattern))
    }

    /// Substitutes the given values into the pattern.
    ///
    /// Values are inserted verbatim; callers encode them first.
    #[must_use]
    pub fn fill(&self, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(self.0.clone(), |url, (placeholder, value)| {
                url.replacen(placeholder, value, 1)
            })
    }
}

impl AsRef<str> for UrlPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
