//! Page-load gate for the single-page front end.
//!
//! Sessions belong to the agents backend: the server only checks that the
//! session cookie is present, and asks the backend for the profile when an
//! `/admin` page is requested.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::COOKIE, HeaderMap, Method, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::main_lib::AppState;

const LOGIN_PAGE: &str = "/login";
const PUBLIC_PAGES: [&str; 2] = [LOGIN_PAGE, "/register"];
const EXEMPT_PREFIXES: [&str; 2] = ["/api/", "/uploads/"];

/// Value of the `name` cookie, if it is set and non-empty.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}

/// The full `Cookie` header, forwarded verbatim to the backend.
fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

/// Only navigations to front-end routes are gated; API calls, uploads and
/// static assets (anything with a file extension) pass through.
fn is_page_load(method: &Method, path: &str) -> bool {
    if method != Method::GET && method != Method::HEAD {
        return false;
    }
    if path == "/api" || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return false;
    }
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    !last_segment.contains('.')
}

fn is_public_page(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    PUBLIC_PAGES.contains(&path)
}

fn is_admin_page(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !is_page_load(request.method(), &path) {
        return next.run(request).await;
    }

    let has_session = cookie_value(request.headers(), &state.session_cookie).is_some();
    if is_public_page(&path) {
        if has_session {
            return Redirect::temporary("/").into_response();
        }
        return next.run(request).await;
    }
    if !has_session {
        tracing::debug!("No session cookie for {}, redirecting to login", path);
        return Redirect::temporary(LOGIN_PAGE).into_response();
    }

    if is_admin_page(&path) {
        let cookie = cookie_header(request.headers()).unwrap_or_default();
        match state.backend.fetch_profile(&cookie).await {
            Ok(Some(profile)) if profile.is_admin() => {}
            Ok(Some(profile)) => {
                tracing::info!("Agent {:?} is not an admin, leaving {}", profile.id, path);
                return Redirect::temporary("/").into_response();
            }
            Ok(None) => return Redirect::temporary(LOGIN_PAGE).into_response(),
            Err(e) => {
                tracing::warn!("Profile lookup failed for {}: {}", path, e);
                return Redirect::temporary("/").into_response();
            }
        }
    }

    next.run(request).await
}
