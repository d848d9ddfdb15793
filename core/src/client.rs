//! JSON-over-HTTP request helper.
//!
//! # Design
//! `HttpClient` holds a read-only `ClientConfig` and a `Transport`, and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that validates input and produces an `HttpRequest`, and
//! `parse_json`, which consumes an `HttpResponse`. `send` connects the two
//! through the transport; `get`, `post_form` and `patch` run the whole
//! sequence.
//!
//! A caller-supplied header mapping replaces the configured default headers
//! outright. Nothing is merged.

use std::io::{self, Read};

use serde_json::Value;
use ureq::http::{HeaderName, HeaderValue};
use url::Url;

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::form::{encode_form, is_form_urlencoded, FormData};
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse, JsonResponse};
use crate::transport::{Transport, UreqTransport};

const CONTENT_TYPE: &str = "Content-Type";

/// Synchronous, stateless helper for JSON APIs.
#[derive(Debug, Clone)]
pub struct HttpClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl Default for HttpClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl HttpClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self { config, transport }
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_get(&self, url: &str, headers: Option<Headers>) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: parse_url(url)?,
            headers: self.request_headers(headers)?,
            body: None,
            timeout: None,
        })
    }

    /// Build a POST whose body is `form` encoded as
    /// `application/x-www-form-urlencoded`.
    ///
    /// `encoding` is sent verbatim as the `Content-Type` header. It does not
    /// change how the body is encoded.
    pub fn build_post_form(
        &self,
        url: &str,
        encoding: &str,
        form: Option<&FormData>,
    ) -> Result<HttpRequest, HttpError> {
        let url = parse_url(url)?;
        if !is_form_urlencoded(encoding) {
            tracing::warn!(encoding, "content type label does not match the form-encoded body");
        }
        let body = match form {
            Some(form) => encode_form(form)?,
            None => String::new(),
        };
        let mut headers = self.request_headers(None)?;
        set_content_type(&mut headers, encoding)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: Some(body),
            timeout: None,
        })
    }

    /// Build a PATCH carrying `body` as-is. `content_type` is applied after
    /// `headers`, overriding any content type they carry.
    pub fn build_patch(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
        headers: Option<Headers>,
    ) -> Result<HttpRequest, HttpError> {
        let url = parse_url(url)?;
        let mut headers = self.request_headers(headers)?;
        set_content_type(&mut headers, content_type)?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url,
            headers,
            body: Some(body.to_string()),
            timeout: None,
        })
    }

    /// Execute `request` and decode the response.
    pub fn send(&self, request: HttpRequest) -> Result<JsonResponse, HttpError> {
        tracing::debug!(method = %request.method, url = %loggable_url(&request.url), "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response");
        self.parse_json(response)
    }

    /// Check for status 200, read the body and decode it as a JSON object.
    ///
    /// The body is drained on every path, including non-200 responses.
    pub fn parse_json(&self, response: HttpResponse) -> Result<JsonResponse, HttpError> {
        let HttpResponse {
            status,
            headers,
            mut body,
        } = response;

        if status != 200 {
            let _ = io::copy(&mut body, &mut io::sink());
            return Err(HttpError::UnexpectedStatus { status });
        }

        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes).map_err(HttpError::BodyRead)?;

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(body) => Ok(JsonResponse {
                status,
                body,
                headers,
            }),
            other => Err(HttpError::Decode(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn get(&self, url: &str, headers: Option<Headers>) -> Result<JsonResponse, HttpError> {
        self.send(self.build_get(url, headers)?)
    }

    pub fn post_form(
        &self,
        url: &str,
        encoding: &str,
        form: Option<&FormData>,
    ) -> Result<JsonResponse, HttpError> {
        self.send(self.build_post_form(url, encoding, form)?)
    }

    pub fn patch(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
        headers: Option<Headers>,
    ) -> Result<JsonResponse, HttpError> {
        self.send(self.build_patch(url, content_type, body, headers)?)
    }

    /// Caller headers when supplied, otherwise the configured defaults.
    fn request_headers(&self, headers: Option<Headers>) -> Result<Headers, HttpError> {
        let headers = headers.unwrap_or_else(|| self.config.default_headers.clone());
        for (name, values) in &headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HttpError::Construction(format!("header name {name:?}: {e}")))?;
            for value in values {
                HeaderValue::from_str(value)
                    .map_err(|e| HttpError::Construction(format!("header {name}: {e}")))?;
            }
        }
        Ok(headers)
    }
}

fn parse_url(raw: &str) -> Result<String, HttpError> {
    let url = Url::parse(raw).map_err(|e| HttpError::Construction(format!("{raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(HttpError::Construction(format!(
                "unsupported URL scheme {other:?}"
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(HttpError::Construction(format!("{raw:?}: missing host")));
    }
    Ok(url.into())
}

/// Scheme, host, port and path only: query strings and userinfo may carry
/// credentials.
fn loggable_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => format!("{}{}", url.origin().ascii_serialization(), url.path()),
        Err(_) => String::from("<invalid url>"),
    }
}

fn set_content_type(headers: &mut Headers, content_type: &str) -> Result<(), HttpError> {
    HeaderValue::from_str(content_type)
        .map_err(|e| HttpError::Construction(format!("content type {content_type:?}: {e}")))?;
    headers.retain(|name, _| !name.eq_ignore_ascii_case(CONTENT_TYPE));
    headers.insert(CONTENT_TYPE.to_string(), vec![content_type.to_string()]);
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// GET `url` with a default client.
pub fn http_get(url: &str, headers: Option<Headers>) -> Result<JsonResponse, HttpError> {
    HttpClient::new(ClientConfig::default()).get(url, headers)
}

/// POST form-encoded `form` to `url` with a default client.
pub fn http_post(
    url: &str,
    encoding: &str,
    form: Option<&FormData>,
) -> Result<JsonResponse, HttpError> {
    HttpClient::new(ClientConfig::default()).post_form(url, encoding, form)
}

/// PATCH `body` to `url` with a default client.
pub fn http_patch(
    url: &str,
    content_type: &str,
    body: &str,
    headers: Option<Headers>,
) -> Result<JsonResponse, HttpError> {
    HttpClient::new(ClientConfig::default()).patch(url, content_type, body, headers)
}
