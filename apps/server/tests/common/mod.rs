#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use tripdesk_server::{
    api::app_router,
    build_state,
    config::{AppInfoConfig, Config},
};

pub const SESSION: &str = "token=session-abc";

pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

fn test_config(dir: &TempDir, backend_url: &str) -> Config {
    let static_dir = dir.path().join("dist");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<html>TripDesk</html>").unwrap();

    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        backend_url: backend_url.to_string(),
        uploads_dir: dir.path().join("uploads"),
        static_dir: static_dir.to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        session_cookie: "token".to_string(),
        app_info: AppInfoConfig {
            name: "TripDesk".to_string(),
            description: "Omra back office".to_string(),
            logo: "/logo.png".to_string(),
            public_api_url: "/api".to_string(),
        },
    }
}

/// App over a fresh database; the backend is unreachable unless a URL is given.
pub async fn app_with_backend(backend_url: &str) -> TestApp {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, backend_url);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        dir,
    }
}

pub async fn app() -> TestApp {
    app_with_backend("http://127.0.0.1:9").await
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

pub async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let (status, _, bytes) = send(router, request).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    call(router, Method::GET, uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(router, Method::POST, uri, Some(body)).await
}

pub async fn put(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(router, Method::PUT, uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    call(router, Method::DELETE, uri, None).await
}

/// Id of a freshly created record.
pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}
