//! HTTP response types for the Assembla API client.
//!
//! This module provides the [`HttpResponse`] type together with the status
//! and body checks every API call goes through.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::RequestError;

/// Status code the API uses for application-level failures reported with a
/// successful transport status.
pub const FALSE_SUCCESS_STATUS: u16 = 400;

/// An HTTP response as returned by a [`Transport`](crate::clients::Transport).
///
/// The body is kept as raw text; [`HttpResponse::json`] decodes it.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The status reason phrase (e.g. `Not Found`).
    pub status_text: String,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(
        code: u16,
        status_text: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            code,
            status_text: status_text.into(),
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx responses and for `304 Not Modified`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        (self.code >= 200 && self.code <= 299) || self.code == 304
    }

    /// Fails unless the status is acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Response`] carrying the status code and reason
    /// phrase for anything other than 2xx or 304.
    pub fn check_status(&self) -> Result<(), RequestError> {
        if self.is_ok() {
            return Ok(());
        }

        let message = if self.status_text.is_empty() {
            format!("HTTP {}", self.code)
        } else {
            self.status_text.clone()
        };

        Err(RequestError::Response {
            status: self.code,
            message,
        })
    }

    /// Decodes the body as JSON.
    ///
    /// `204 No Content` and empty bodies decode to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// - [`RequestError::Decode`] if the body is not valid JSON
    /// - [`RequestError::Response`] with status 400 if the body is an object
    ///   whose `error` field is set, even though the status was successful
    pub fn json(&self) -> Result<Value, RequestError> {
        if self.code == 204 || self.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let json: Value = serde_json::from_str(&self.body)?;

        if let Some(error) = json.get("error").filter(|e| is_truthy(e)) {
            let message = error
                .as_str()
                .map_or_else(|| error.to_string(), ToString::to_string);
            tracing::warn!(
                status = self.code,
                "API reported a failure with a successful status: {message}"
            );
            return Err(RequestError::Response {
                status: FALSE_SUCCESS_STATUS,
                message,
            });
        }

        Ok(json)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
