//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. `HttpClient` is generic
//! over it so tests can swap in a canned transport, and hosts that already
//! own an HTTP stack can plug it in instead of `UreqTransport`.

use ureq::config::AutoHeaderValue;
use ureq::{Agent, RequestBuilder};

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};

/// Sends a request and hands back the status, headers and unread body.
///
/// Implementations must report any non-2xx status as data, never as an
/// error: status interpretation belongs to the caller.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent pools connections; cloning the transport shares the pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// The agent adds no headers of its own: every request carries exactly
    /// the mapping built by `HttpClient`.
    pub fn new(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout())
            .user_agent(AutoHeaderValue::None)
            .accept(AutoHeaderValue::None)
            .accept_encoding(AutoHeaderValue::None)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

/// Copy headers and the per-request timeout onto a ureq builder.
fn prepare<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, values) in &request.headers {
        for value in values {
            builder = builder.header(name.as_str(), value.as_str());
        }
    }
    match request.timeout {
        Some(timeout) => builder.config().timeout_global(Some(timeout)).build(),
        None => builder,
    }
}

fn map_error(err: ureq::Error) -> HttpError {
    match err {
        ureq::Error::BadUri(msg) => HttpError::Construction(msg),
        ureq::Error::Http(e) => HttpError::Construction(e.to_string()),
        other => HttpError::Transport(other.to_string()),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => prepare(self.agent.get(url), &request).call(),
            HttpMethod::Post => send_with_body(prepare(self.agent.post(url), &request), &request),
            HttpMethod::Patch => send_with_body(prepare(self.agent.patch(url), &request), &request),
        };
        let response = result.map_err(map_error)?;

        let status = response.status().as_u16();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        let body = response.into_body().into_reader();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn send_with_body(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    request: &HttpRequest,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match &request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
