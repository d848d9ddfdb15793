//! Small blocking helpers for a larger application.
//!
//! # Overview
//! - JSON-over-HTTP: `http_get`, `http_post` (form-encoded) and `http_patch`,
//!   or an `HttpClient` built from an explicit `ClientConfig` and `Transport`.
//! - Environment: `get_env_key`, `get_current_directory`.
//! - Cloud boundary: object storage, email and parameter store wrappers over
//!   caller-supplied service handles.
//!
//! # Design
//! - No process-wide state: the default client is constructed per call, and
//!   hosts that want connection reuse keep their own `HttpClient`.
//! - Requests are plain data (`build_*`) and responses are parsed separately
//!   (`parse_json`), so the I/O boundary is explicit and the transport can be
//!   swapped in tests.
//! - Only status 200 with a JSON object body counts as success.

pub mod client;
pub mod cloud;
pub mod config;
pub mod env;
pub mod error;
pub mod form;
pub mod http;
pub mod transport;

pub use client::{http_get, http_patch, http_post, HttpClient};
pub use config::ClientConfig;
pub use env::{get_current_directory, get_env_key};
pub use error::{EnvError, HttpError, ServiceError};
pub use form::{encode_form, FormData, FORM_URLENCODED};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse, JsonResponse};
pub use transport::{Transport, UreqTransport};
