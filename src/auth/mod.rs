//! Authentication types for the Assembla API client.
//!
//! # Overview
//!
//! - [`TokenData`]: The stored access/refresh token pair and its expiry
//! - [`CredentialStore`]: Async key/value storage for token data
//! - [`MemoryStore`]: The default, process-local store
//! - [`Credentials`]: Resolves an access token for each request, refreshing
//!   it through the configured token refresher when it has expired
//!
//! # Token Lifecycle
//!
//! The application obtains tokens out of band (usually through the URL from
//! [`AssemblaConfig::code_request_url`](crate::AssemblaConfig::code_request_url))
//! and hands them over with `store_token`. Every stored token is stamped to
//! expire [`ACCESS_TOKEN_LIFETIME_MS`] later. With a token refresher
//! configured, each request either extends a valid token or exchanges an
//! expired one.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use assembla_api::auth::{Credentials, MemoryStore, TokenData};
//! use assembla_api::clients::ReqwestTransport;
//!
//! # tokio_test::block_on(async {
//! let credentials = Credentials::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(ReqwestTransport::new()),
//!     None,
//! );
//!
//! let stored = credentials.store_token(&TokenData::new("123", "456")).await.unwrap();
//! assert!(stored.expires.is_some());
//! # });
//! ```

mod credentials;
mod storage;
mod token;

pub use credentials::Credentials;
pub use storage::{CredentialStore, MemoryStore, StorageError};
pub use token::{TokenData, ACCESS_TOKEN_LIFETIME_MS, TOKEN_STORAGE_KEY};
