//! Shared helpers for router tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use davbridge_api::{AppState, build_router};
use davbridge_core::config::AppConfig;
use davbridge_storage::WebDavClient;

pub const TOKEN: &str = "s3cr3t-token";

pub const BOUNDARY: &str = "davbridge-test-boundary";

/// Router wired to a mock WebDAV server mounted at `/dav`.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Mock WebDAV server
    pub dav: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config("").await
    }

    /// Build the app with extra TOML appended to the minimal config.
    ///
    /// The config ends inside `[auth]`, so bare keys in `extra` land there.
    pub async fn with_config(extra: &str) -> Self {
        let dav = MockServer::start().await;
        let base_url = format!("{}/dav", dav.uri());
        Self {
            router: router_for(&base_url, extra),
            dav,
        }
    }

    /// App whose WebDAV base URL points at a port nothing listens on.
    ///
    /// `dav` is still started but never receives a request.
    pub async fn unreachable() -> Self {
        Self {
            router: router_for("http://127.0.0.1:1/dav", ""),
            dav: MockServer::start().await,
        }
    }

    /// Make a JSON request; `token` is sent verbatim as `Authorization`.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, "application/json", body.into_bytes(), token)
            .await
    }

    /// POST a multipart body built with [`multipart_body`].
    pub async fn upload(&self, body: Vec<u8>, token: Option<&str>) -> TestResponse {
        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        self.raw_request("POST", "/upload", &content_type, body, token)
            .await
    }

    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);

        if let Some(token) = token {
            req = req.header("Authorization", token);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

fn router_for(base_url: &str, extra: &str) -> Router {
    let toml = format!(
        "[webdav]\nbase_url = \"{base_url}\"\n\n[auth]\ntoken = \"{TOKEN}\"\n{extra}"
    );
    let config = AppConfig::from_toml_str(&toml).expect("Failed to parse test config");
    let webdav = WebDavClient::new(&config.webdav).expect("Failed to build client");
    build_router(AppState::new(config, webdav))
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A multipart part: `(name, file_name, content)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// Encode `parts` as `multipart/form-data` with [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
