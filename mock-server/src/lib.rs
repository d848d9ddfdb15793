use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// `Authorization` value accepted by `/auth`: basic auth for
/// `username:password`.
pub const BASIC_AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

/// Header added to every `/hello` response.
pub const HELLO_HEADER: &str = "x-mock";

pub fn app() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/auth", get(auth))
        .route("/forbidden", any(forbidden))
        .route("/malformed", get(malformed))
        .route("/array", get(array))
        .route("/headers", get(echo_headers))
        .route("/echo", post(echo).patch(echo))
        .route("/status/{code}", any(status))
        .route("/slow", get(slow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello() -> impl IntoResponse {
    ([(HELLO_HEADER, "hello")], Json(json!({ "hello": "world" })))
}

async fn auth(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value == BASIC_AUTH => Ok(Json(json!({ "hello": "world" }))),
        _ => Err(StatusCode::FORBIDDEN),
    }
}

async fn forbidden() -> (StatusCode, Json<Value>) {
    (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" })))
}

async fn malformed() -> &'static str {
    r#"{"hello":"#
}

async fn array() -> Json<Value> {
    Json(json!([1, 2, 3]))
}

/// Request headers as `{name: [values]}`.
async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    Json(header_map(&headers))
}

/// Reflects method, content type, raw body and, for form bodies, the
/// decoded fields.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let mut form: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if content_type.starts_with("application/x-www-form-urlencoded") {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&body).unwrap_or_default();
        for (key, value) in pairs {
            form.entry(key).or_default().push(value);
        }
    }
    Json(json!({
        "method": method.as_str(),
        "content_type": content_type,
        "body": body,
        "form": form,
    }))
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(json!({ "status": code }))))
}

#[derive(Deserialize)]
struct SlowParams {
    #[serde(default)]
    ms: u64,
}

async fn slow(Query(params): Query<SlowParams>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    Json(json!({ "slept_ms": params.ms }))
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
