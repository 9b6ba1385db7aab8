mod common;

use axum::{
    body::Body,
    http::{header, Method, Request},
};
use common::{app, app_with_backend, get, send, SESSION};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use serde_json::{json, Value};

fn patch_agent(id: &str, active: bool) -> Request<Body> {
    Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/admin/agents/{id}"))
        .header(header::COOKIE, SESSION)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "isActive": active }).to_string()))
        .unwrap()
}

fn list_agents() -> Request<Body> {
    Request::builder()
        .uri("/api/admin/agents")
        .header(header::COOKIE, SESSION)
        .body(Body::empty())
        .unwrap()
}

fn agent(active: bool) -> Value {
    json!({ "id": "a1", "name": "Karim", "email": "karim@agency.ma", "role": "agent", "isActive": active })
}

#[tokio::test]
async fn login_relays_status_body_and_cookie() {
    let backend = MockServer::start();
    let login = backend.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({ "email": "admin@agency.ma", "password": "secret" }));
        then.status(200)
            .header("content-type", "application/json")
            .header("set-cookie", "token=abc123; Path=/; HttpOnly")
            .json_body(json!({ "user": { "id": "u1", "role": "admin" } }));
    });
    let app = app_with_backend(&backend.base_url()).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "admin@agency.ma", "password": "secret" }).to_string(),
        ))
        .unwrap();
    let (status, headers, body) = send(&app.router, request).await;

    login.assert();
    assert_eq!(status, 200);
    assert_eq!(headers[header::SET_COOKIE], "token=abc123; Path=/; HttpOnly");
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn backend_errors_are_relayed_unchanged() {
    let backend = MockServer::start();
    backend.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(409)
            .header("content-type", "application/json")
            .json_body(json!({ "message": "Email already used" }));
    });
    let app = app_with_backend(&backend.base_url()).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": "x@y.z" }).to_string()))
        .unwrap();
    let (status, _, body) = send(&app.router, request).await;
    assert_eq!(status, 409);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Email already used");
}

#[tokio::test]
async fn toggling_an_agent_twice_restores_it() {
    let backend = MockServer::start();
    let mut listing = backend.mock(|when, then| {
        when.method(GET).path("/api/admin/agents").header("cookie", SESSION);
        then.status(200).json_body(json!([agent(true)]));
    });
    let deactivate = backend.mock(|when, then| {
        when.method(PATCH)
            .path("/api/admin/agents/a1")
            .header("cookie", SESSION)
            .json_body(json!({ "isActive": false }));
        then.status(200).json_body(agent(false));
    });
    let reactivate = backend.mock(|when, then| {
        when.method(PATCH)
            .path("/api/admin/agents/a1")
            .header("cookie", SESSION)
            .json_body(json!({ "isActive": true }));
        then.status(200).json_body(agent(true));
    });
    let app = app_with_backend(&backend.base_url()).await;

    let (_, _, before) = send(&app.router, list_agents()).await;
    let before: Value = serde_json::from_slice(&before).unwrap();

    let (status, _, first) = send(&app.router, patch_agent("a1", false)).await;
    assert_eq!(status, 200);
    assert_eq!(serde_json::from_slice::<Value>(&first).unwrap()["isActive"], false);

    let (status, _, second) = send(&app.router, patch_agent("a1", true)).await;
    assert_eq!(status, 200);
    assert_eq!(serde_json::from_slice::<Value>(&second).unwrap()["isActive"], true);

    deactivate.assert();
    reactivate.assert();

    // the listing is whatever the backend now reports
    listing.delete();
    backend.mock(|when, then| {
        when.method(GET).path("/api/admin/agents");
        then.status(200).json_body(json!([agent(true)]));
    });
    let (_, _, after) = send(&app.router, list_agents()).await;
    let after: Value = serde_json::from_slice(&after).unwrap();
    assert_eq!(before, after);
    assert_eq!(after[0]["isActive"], true);
}

#[tokio::test]
async fn unreachable_backend_is_a_500() {
    let app = app().await;
    let (status, body) = get(&app.router, "/api/auth/profile").await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({ "code": 500, "message": "Connection error with the server" })
    );
}
