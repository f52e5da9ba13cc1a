//! # Assembla API Rust Client
//!
//! A Rust client for the Assembla REST API, built around a fluent, stateful
//! resource builder.
//!
//! ## Overview
//!
//! This crate provides:
//! - A resource tree (`users`, `spaces` and everything nested under them)
//!   whose nodes compose request paths from `find(id)` chains
//! - Operation sets per resource kind, checked before anything is sent
//! - Bearer-token credentials with optional transparent refresh
//! - A pluggable HTTP transport ([`ReqwestTransport`] by default) and a
//!   pluggable credential store ([`MemoryStore`] by default)
//! - Type-safe configuration via [`AssemblaConfig`] and [`AssemblaConfigBuilder`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use assembla_api::{Assembla, AssemblaConfig, TokenData};
//! use serde_json::json;
//!
//! let api = Assembla::new(AssemblaConfig::default());
//! api.store_token(&TokenData::new("access-token", "refresh-token")).await?;
//!
//! // GET https://api.assemb.la/v1/spaces/s1/space_tools/t1/merge_requests/m1/versions/v1/votes
//! let votes = api
//!     .spaces()
//!     .find("s1")?
//!     .child("spaceTools")?
//!     .find("t1")?
//!     .child("mergeRequests")?
//!     .find("m1")?
//!     .child("versions")?
//!     .find("v1")?
//!     .child("votes")?
//!     .read()?
//!     .await?;
//!
//! // GET https://api.assemb.la/v1/spaces/s1/search?q=docs
//! let found = api.spaces().find("s1")?.search(json!({"q": "docs"}))?.await?;
//! ```
//!
//! ## Two Error Phases
//!
//! Every terminal operation returns `Result<ResponseFuture, UsageError>`:
//!
//! - a [`UsageError`] is returned immediately when the chain is wrong (an
//!   ancestor without id, a forbidden operation, `update` without `find`);
//! - a [`RequestError`] is delivered by the future when the request fails
//!   (no token, non-2xx status, `{ "error": ... }` body).
//!
//! [`Error`] wraps both so `?` works across the whole call.
//!
//! ## Builder State
//!
//! Ids and parameters are kept on the nodes between calls. Every terminal
//! operation clears them on the called node and its ancestors before
//! returning, so a new chain can start while the previous request is still
//! in flight. Chains on the same tree must not run concurrently.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction, builder
//!   misuse fails before dispatch
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

mod assembla;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use assembla::{Assembla, AssemblaBuilder};
pub use auth::{CredentialStore, Credentials, MemoryStore, StorageError, TokenData};
pub use config::{AssemblaConfig, AssemblaConfigBuilder, UrlBase, UrlPattern};
pub use error::{ConfigError, Error};

// Re-export HTTP client types
pub use clients::{
    ApiClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, ReqwestTransport, RequestError, Transport,
};

// Re-export resource builder types
pub use rest::{
    ApiRequest, Blueprint, Dispatcher, NodeKind, Payload, ResourceNode, ResourceOperation,
    ResourceTree, ResponseFuture, UsageError,
};
