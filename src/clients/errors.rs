//! Request error types for the Assembla API client.
//!
//! Everything that can go wrong once a request has been handed to the
//! dispatcher is reported as a [`RequestError`], through the failure path of
//! the returned future.
//!
//! # Example
//!
//! ```rust,ignore
//! use assembla_api::clients::RequestError;
//!
//! match api.spaces().read()?.await {
//!     Ok(spaces) => println!("Spaces: {spaces}"),
//!     Err(RequestError::Unauthorized) => println!("Please log in again"),
//!     Err(e) => println!("Request failed ({:?}): {e}", e.status_code()),
//! }
//! ```

use thiserror::Error;

use crate::auth::StorageError;
use crate::error::ConfigError;

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request has no URL.
    #[error("Cannot send a request without a URL.")]
    EmptyUrl,

    /// The method does not take a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that was used.
        method: String,
    },
}

/// Errors delivered through the future of a dispatched request.
///
/// # Example
///
/// ```rust
/// use assembla_api::clients::RequestError;
///
/// let error = RequestError::Unauthorized;
/// assert_eq!(error.status_code(), Some(401));
/// assert_eq!(error.to_string(), "Unauthorized");
/// ```
#[derive(Debug, Error)]
pub enum RequestError {
    /// No usable access/refresh token pair is stored.
    #[error("Unauthorized")]
    Unauthorized,

    /// The API answered with a failure status, or reported a failure in the
    /// body of a successful response (status 400).
    #[error("{message}")]
    Response {
        /// The HTTP status code.
        status: u16,
        /// The reason phrase or the API's error message.
        message: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The credential store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A setting needed for this request is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request was rejected before it was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl RequestError {
    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Response { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// Verify RequestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestError>();
};
