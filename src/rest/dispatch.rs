//! The seam between resource nodes and the HTTP layer.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{HttpMethod, RequestError};
use crate::rest::payload::Payload;

/// A request composed by a resource node.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// The resource path, e.g. `spaces/s1/space_tools`, without version prefix.
    pub path: String,
    /// Query parameters for GET, body for every other method.
    pub payload: Payload,
    /// The HTTP method.
    pub method: HttpMethod,
}

/// Pending result of a terminal operation.
///
/// The builder state has already been reset by the time this is returned;
/// awaiting it only drives the request itself.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<Value, RequestError>> + Send>>;

/// Executes requests composed by resource nodes.
///
/// [`ApiClient`](crate::clients::ApiClient) is the production
/// implementation. Tests substitute a recording double.
#[async_trait]
pub trait Dispatcher: fmt::Debug + Send + Sync {
    /// Resolves credentials, sends the request and decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] for every failure after dispatch.
    async fn dispatch(&self, request: ApiRequest) -> Result<Value, RequestError>;
}
