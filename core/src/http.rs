//! HTTP request and response types.
//!
//! # Design
//! Requests are plain data: a method, an already-validated URL, a header
//! mapping and an optional body. `HttpClient::build_*` produces them and a
//! `Transport` executes them. Responses carry their body as a reader so the
//! status can be checked before any bytes are pulled off the wire; dropping
//! the response releases the connection.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::time::Duration;

use serde_json::{Map, Value};

/// Header mapping: name to ordered list of values.
pub type Headers = BTreeMap<String, Vec<String>>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `HttpClient::build_*`. The URL has already been checked to be an
/// absolute `http`/`https` URL by the time a value of this type exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    /// Upper bound on the whole round-trip. `None` leaves the transport's
    /// configured default in place.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A raw HTTP response: status, headers, and an unread body.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Headers, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            headers,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A successful response whose body decoded to a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Map<String, Value>,
    /// Response headers; names are lower-case.
    pub headers: Headers,
}

impl JsonResponse {
    /// First value of a response header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}
