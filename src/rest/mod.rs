//! The resource builder for the Assembla REST API.
//!
//! Resources form a fixed tree ([`ResourceTree`]) of stateful
//! [`ResourceNode`]s. A call is a chain of builder operations followed by one
//! terminal operation:
//!
//! - **Builder**: `find(id)` selects a member, `all()` the collection,
//!   `params(map)` replaces the parameters of the next call.
//! - **Terminal**: `create(data)` (POST), `read()` (GET), `update(data)` (PUT)
//!   and `delete()` (DELETE) compose the path, reset the chain and return a
//!   [`ResponseFuture`].
//!
//! # Error Phases
//!
//! Misuse of the chain is reported synchronously as a [`UsageError`], before
//! anything is sent. Failures of the request itself arrive through the
//! future as a [`RequestError`](crate::clients::RequestError).
//!
//! # Node Kinds
//!
//! Most resources support every operation. A few are restricted, see
//! [`NodeKind`]: `repos` can only be narrowed with `find`, `commit` must be
//! found before it is read, `commits` is a read-only listing, and `search`
//! is a parameterized read that also clears the whole `spaces` subtree.
//!
//! # Example
//!
//! ```rust,ignore
//! use assembla_api::Assembla;
//! use serde_json::json;
//!
//! let api = Assembla::new(config);
//!
//! // GET /v1/spaces/s1/space_tools/t1/merge_requests?status=open
//! let open = api
//!     .spaces()
//!     .find("s1")?
//!     .child("spaceTools")?
//!     .find("t1")?
//!     .child("mergeRequests")?
//!     .params(json!({"status": "open"}))?
//!     .read()?
//!     .await?;
//!
//! // POST /v1/spaces with {"name": "docs"}
//! let space = api.spaces().create(json!({"name": "docs"}))?.await?;
//! ```

mod capability;
mod dispatch;
mod errors;
mod node;
mod path;
mod payload;
mod tree;

pub use capability::NodeKind;
pub use dispatch::{ApiRequest, Dispatcher, ResponseFuture};
pub use errors::UsageError;
pub use node::ResourceNode;
pub use path::{PathBuilder, ResourceOperation};
pub use payload::Payload;
pub use tree::{camelize, Blueprint, ResourceTree};
