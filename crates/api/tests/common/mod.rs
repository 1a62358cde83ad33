//! Shared harness for HTTP-level integration tests.
//!
//! Requests go straight into the real router via `tower::ServiceExt::oneshot`,
//! so every test exercises the production middleware stack.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use stockroom_api::config::ServerConfig;
use stockroom_api::router::build_app_router;
use stockroom_api::state::AppState;

const BOUNDARY: &str = "stockroom-test-boundary";

/// Build a test `ServerConfig` writing uploads to `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        replacement_threshold_days: 100,
        replacement_sweep_interval_secs: 0,
        cookie_secure: false,
    }
}

/// Build the full application router on `pool` with a fresh upload directory.
///
/// The returned [`TempDir`] must outlive the test's requests.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = test_config(upload_dir.path());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    (build_app_router(state, &config), upload_dir)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn builder(method: &str, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let request = builder("GET", uri, cookie).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let request = builder("DELETE", uri, cookie).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    json_request(app, "POST", uri, body, cookie).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    json_request(app, "PUT", uri, body, cookie).await
}

async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Value,
    cookie: Option<&str>,
) -> Response {
    let request = builder(method, uri, cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A photo part for [`multipart`]: `(filename, bytes)`.
pub type Photo<'a> = (&'a str, &'a [u8]);

/// Send a `multipart/form-data` request with text fields and an optional photo.
pub async fn multipart(
    app: &Router,
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    photo: Option<Photo<'_>>,
    cookie: Option<&str>,
) -> Response {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, data)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = builder(method, uri, cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// The raw `Set-Cookie` header of a response.
pub fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

/// The `name=value` pair of a `Set-Cookie` header, ready to send back.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

pub const PASSWORD: &str = "test_password_123!";

/// Register `username` and return the registration response.
pub async fn register(app: &Router, username: &str) -> Response {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": PASSWORD,
    });
    post_json(app, "/api/auth/register", body, None).await
}

/// Register and log in `username`, returning the cookie to send back.
pub async fn login_cookie(app: &Router, username: &str) -> String {
    let response = register(app, username).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "username": username, "password": PASSWORD });
    let response = post_json(app, "/api/auth/login", body, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    cookie_pair(&set_cookie(&response))
}
