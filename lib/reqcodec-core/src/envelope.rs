//! Transport-agnostic request and response envelopes.
//!
//! A [`GenericRequest`] is what a request codec hands to an adapter: a fully
//! interpolated URL plus a [`RequestInit`] (method, headers, serialized
//! body). A [`GenericResponse`] is what the adapter hands back: either a
//! parsed JSON body or a failure code with an explanation.
//!
//! # Example
//!
//! ```
//! use reqcodec_core::{GenericRequest, Method};
//!
//! let request = GenericRequest::builder(Method::Post, "/sites/5")
//!     .json(&serde_json::json!({"foo": "bar"}))
//!     .expect("serialize")
//!     .build();
//!
//! assert_eq!(request.url(), "/sites/5");
//! assert_eq!(request.header("Content-Type"), Some("application/json"));
//! assert_eq!(request.body_text(), Some(r#"{"foo":"bar"}"#));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

use crate::Method;

/// Header name for the request content type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// MIME type of every body a request codec sends.
pub const APPLICATION_JSON: &str = "application/json";

/// Failure code used for transport faults with no more specific status.
pub const TRANSPORT_FAULT_CODE: u16 = 500;

/// Method, headers and body of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInit {
    method: Method,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl RequestInit {
    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Serialized request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// A request ready for an adapter. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericRequest {
    url: String,
    init: RequestInit,
}

impl GenericRequest {
    /// Creates a new [`GenericRequestBuilder`].
    ///
    /// `url` is either fully qualified or a path the adapter resolves
    /// against its own base.
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> GenericRequestBuilder {
        GenericRequestBuilder::new(method, url)
    }

    /// Request URL or path.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Method, headers and body.
    #[must_use]
    pub const fn init(&self) -> &RequestInit {
        &self.init
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.init.method
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.init.headers
    }

    /// Single header value by name, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.init
            .headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Serialized body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.init.body.as_ref()
    }

    /// Body as UTF-8 text, if present and valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.init
            .body
            .as_ref()
            .and_then(|body| std::str::from_utf8(body).ok())
    }

    /// Consume into (url, init).
    #[must_use]
    pub fn into_parts(self) -> (String, RequestInit) {
        (self.url, self.init)
    }
}

/// Builder for [`GenericRequest`].
#[derive(Debug, Clone)]
pub struct GenericRequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl GenericRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any header whose name differs only in case.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in headers {
            self.set_header(name, value);
        }
        self
    }

    fn set_header(&mut self, name: String, value: String) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value);
    }

    /// Sets an already serialized body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body and set the content type.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header(CONTENT_TYPE, APPLICATION_JSON).body(body))
    }

    /// Builds the [`GenericRequest`].
    #[must_use]
    pub fn build(self) -> GenericRequest {
        GenericRequest {
            url: self.url,
            init: RequestInit {
                method: self.method,
                headers: self.headers,
                body: self.body,
            },
        }
    }
}

/// Outcome of an adapter exchange. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericResponse {
    /// Success status with a parsed JSON body.
    Ok {
        /// Parsed response body.
        body: Value,
    },
    /// Non-success status or transport fault.
    Failure {
        /// HTTP status, or [`TRANSPORT_FAULT_CODE`] for transport faults.
        code: u16,
        /// Status text or fault description.
        explanation: String,
    },
}

impl GenericResponse {
    /// Successful response.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self::Ok { body }
    }

    /// Failed response.
    #[must_use]
    pub fn failure(code: u16, explanation: impl Into<String>) -> Self {
        Self::Failure {
            code,
            explanation: explanation.into(),
        }
    }

    /// Failed response for a transport fault, with code 500.
    #[must_use]
    pub fn transport_fault(explanation: impl Into<String>) -> Self {
        Self::failure(TRANSPORT_FAULT_CODE, explanation)
    }

    /// `true` for [`GenericResponse::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// `true` for [`GenericResponse::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Failure code, if any.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Failure { code, .. } => Some(*code),
            Self::Ok { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let request = GenericRequest::builder(Method::Get, "/users/1")
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url(), "/users/1");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn builder_with_raw_body() {
        let request = GenericRequest::builder(Method::Put, "/items")
            .headers([("X-Trace".to_string(), "1".to_string())])
            .body(r#"{"id":1}"#)
            .build();

        assert_eq!(request.body_text(), Some(r#"{"id":1}"#));
        assert_eq!(request.header("x-trace"), Some("1"));
    }

    #[test]
    fn header_names_are_unique_ignoring_case() {
        let request = GenericRequest::builder(Method::Post, "/items")
            .header("content-type", "text/plain")
            .json(&serde_json::json!({"id": 1}))
            .expect("serializes")
            .headers([("x-trace".to_string(), "1".to_string())])
            .header("X-Trace", "2")
            .build();

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("x-trace"), Some("2"));
        assert!(request.headers().contains_key("Content-Type"));
        assert!(request.headers().contains_key("X-Trace"));
    }

    #[test]
    fn into_parts_keeps_everything() {
        let request = GenericRequest::builder(Method::Delete, "/items/9")
            .header("X-Reason", "cleanup")
            .build();
        let (url, init) = request.into_parts();

        assert_eq!(url, "/items/9");
        assert_eq!(init.method(), Method::Delete);
        assert_eq!(
            init.headers().get("X-Reason").map(String::as_str),
            Some("cleanup")
        );
    }

    #[test]
    fn response_variants() {
        let ok = GenericResponse::ok(serde_json::json!({"foo": "bar"}));
        assert!(ok.is_ok());
        assert_eq!(ok.code(), None);

        let failure = GenericResponse::failure(404, "Not Found");
        assert!(failure.is_failure());
        assert_eq!(failure.code(), Some(404));

        let fault = GenericResponse::transport_fault("connection refused");
        assert_eq!(
            fault,
            GenericResponse::Failure {
                code: 500,
                explanation: "connection refused".to_string()
            }
        );
    }
}
