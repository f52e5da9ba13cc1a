//! HTTP client types for Assembla API communication.
//!
//! This module provides the layer underneath the resource tree:
//!
//! - [`ApiClient`]: Authenticated client that executes resource requests
//! - [`Transport`]: Pluggable HTTP transport; [`ReqwestTransport`] by default
//! - [`HttpRequest`]: A fully resolved request handed to the transport
//! - [`HttpResponse`]: A raw response, with the status and body checks
//!   every API call goes through
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`RequestError`]: Failures of dispatched requests
//!
//! # Response Handling
//!
//! - Any status other than 2xx or `304 Not Modified` fails with
//!   [`RequestError::Response`] carrying the status and reason phrase.
//! - `204 No Content` resolves to `null`.
//! - A successful response whose JSON body carries a truthy `error` field is
//!   treated as a failure with status 400.
//! - A missing or incomplete token pair fails with
//!   [`RequestError::Unauthorized`] before anything is sent.

mod api_client;
mod errors;
mod http_request;
mod http_response;
mod transport;

pub use api_client::{ApiClient, SDK_VERSION};
pub use errors::{InvalidHttpRequestError, RequestError};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, FALSE_SUCCESS_STATUS};
pub use transport::{ReqwestTransport, Transport};
