//! Path building infrastructure for REST resources.
//!
//! A resource path is the `/`-joined chain of resource names and ids from the
//! root of the tree down to the called node, e.g.
//! `spaces/s1/space_tools/t1/merge_requests`. [`PathBuilder`] does the
//! joining; [`ResourceNode::path`](crate::rest::ResourceNode::path) collects
//! the segments.
//!
//! # Example
//!
//! ```rust
//! use assembla_api::rest::PathBuilder;
//!
//! let path = PathBuilder::new()
//!     .push(Some("spaces"))
//!     .push(Some("s1"))
//!     .push(Some("space_tools"))
//!     .push(None::<&str>)
//!     .compose();
//! assert_eq!(path, "spaces/s1/space_tools");
//! ```

use std::fmt;

use crate::clients::HttpMethod;

/// Operations a resource node can be asked to perform.
///
/// `Find` and `All` are builder operations; the other four are terminal and
/// dispatch a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Select a single member (`find(id)`).
    Find,
    /// Select the collection (`all()`).
    All,
    /// Create a member (POST).
    Create,
    /// Read the member or the collection (GET).
    Read,
    /// Update the selected member (PUT).
    Update,
    /// Delete the selected member (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the HTTP method of a terminal operation, `None` for `find`
    /// and `all`.
    #[must_use]
    pub const fn http_method(&self) -> Option<HttpMethod> {
        match self {
            Self::Find | Self::All => None,
            Self::Create => Some(HttpMethod::Post),
            Self::Read => Some(HttpMethod::Get),
            Self::Update => Some(HttpMethod::Put),
            Self::Delete => Some(HttpMethod::Delete),
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins optional path segments with `/`.
///
/// Absent and empty segments are skipped, so a collection path simply
/// pushes `None` for its id.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    chunks: Vec<String>,
}

impl PathBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment; `None` and `""` are ignored.
    #[must_use]
    pub fn push<S: AsRef<str>>(mut self, chunk: Option<S>) -> Self {
        if let Some(chunk) = chunk {
            let chunk = chunk.as_ref();
            if !chunk.is_empty() {
                self.chunks.push(chunk.to_string());
            }
        }
        self
    }

    /// Returns the joined path.
    #[must_use]
    pub fn compose(&self) -> String {
        self.chunks.join("/")
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<PathBuilder>();
};
