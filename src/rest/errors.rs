//! Usage errors raised by the resource builder.
//!
//! A [`UsageError`] means the builder chain itself was wrong: an ancestor
//! without an id, an operation the resource does not support, or an id
//! precondition that does not hold. These are returned synchronously, before
//! any future exists, and never reach the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use assembla_api::rest::UsageError;
//!
//! match api.spaces().child("repos")?.read() {
//!     Err(UsageError::NotAllowed { node, operation }) => {
//!         println!("{node} does not support {operation}");
//!     }
//!     Err(e) => println!("Builder error: {e}"),
//!     Ok(response) => println!("{}", response.await?),
//! }
//! ```

use thiserror::Error;

use crate::rest::path::ResourceOperation;

/// Error type for builder misuse.
///
/// # Example
///
/// ```rust
/// use assembla_api::rest::{ResourceOperation, UsageError};
///
/// let error = UsageError::NotAllowed {
///     node: "commits".to_string(),
///     operation: ResourceOperation::Find,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Could not call API - 'commits.find' is not allowed"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// An ancestor has no id, so no path can be composed.
    #[error(
        "path composition error: parent {parent} must have an ID at {node}.path() (called on {origin})"
    )]
    MissingParentId {
        /// The ancestor lacking an id.
        parent: String,
        /// The direct child of `parent` on the way to the called node.
        node: String,
        /// The node the path was requested for.
        origin: String,
    },

    /// The resource does not support the operation.
    #[error("Could not call API - '{node}.{operation}' is not allowed")]
    NotAllowed {
        /// The resource name.
        node: String,
        /// The rejected operation.
        operation: ResourceOperation,
    },

    /// `create` was called after `find`.
    #[error("Could not call API - `create` should be triggered without ID")]
    IdPresent,

    /// An operation that targets a single member was called without `find`.
    #[error("Could not call API - `find` should be triggered before `{operation}`")]
    IdRequired {
        /// The operation as written in the chain, e.g. `update` or `commit.read()`.
        operation: String,
    },

    /// Parameters or data that are not a JSON object.
    #[error("Could not call API - parameters of '{node}' must be a JSON object")]
    InvalidParams {
        /// The resource the parameters were given to.
        node: String,
    },

    /// No child resource with this name exists.
    #[error("Unknown resource '{name}' under '{parent}'")]
    UnknownResource {
        /// The node that was asked for the child, or `api` at the root.
        parent: String,
        /// The name that did not resolve.
        name: String,
    },

    /// The tree owning this node has been dropped.
    #[error("Resource '{node}' is no longer attached to its tree")]
    Detached {
        /// The node whose parent could not be reached.
        node: String,
    },
}
