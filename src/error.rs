//! Error types for the Assembla API client.
//!
//! The client distinguishes three error families:
//!
//! - [`ConfigError`]: invalid configuration values, raised while building an
//!   [`AssemblaConfig`](crate::AssemblaConfig) or when a helper needs a setting
//!   that was never configured.
//! - [`UsageError`](crate::rest::UsageError): builder misuse, returned
//!   synchronously before any request is dispatched.
//! - [`RequestError`](crate::clients::RequestError): failures of a dispatched
//!   request, delivered through the returned future.
//!
//! [`Error`] unifies all three so that application code can use `?` across
//! both the synchronous and the asynchronous phase of a call.
//!
//! # Example
//!
//! ```rust
//! use assembla_api::{ConfigError, UrlBase};
//!
//! let result = UrlBase::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidUrlBase { .. })));
//! ```

use thiserror::Error;

use crate::clients::RequestError;
use crate::rest::UsageError;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is invalid.
    #[error("Invalid URL base '{url}'. Please provide a URL with scheme (e.g., 'https://api.assemb.la').")]
    InvalidUrlBase {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A URL pattern does not contain its required placeholder.
    #[error("Invalid URL pattern '{pattern}'. Expected the placeholder '{placeholder}'.")]
    InvalidUrlPattern {
        /// The pattern that was provided.
        pattern: String,
        /// The placeholder the pattern must contain.
        placeholder: &'static str,
    },

    /// Avatar lookups need a loader endpoint.
    #[error("`avatar_loader` must be set, in order to use this functionality")]
    MissingAvatarLoader,
}

/// Any error produced by the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Builder misuse, detected before dispatch.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A dispatched request failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}
