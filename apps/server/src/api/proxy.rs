//! Auth and agent-management routes, relayed to the agents backend.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{OriginalUri, State},
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tripdesk_backend::{BackendResponse, ForwardRequest};

use crate::{error::ApiResult, main_lib::AppState};

fn relay(answer: BackendResponse) -> Response {
    let status = StatusCode::from_u16(answer.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, Body::from(answer.body)).into_response();
    let headers = response.headers_mut();
    if let Some(value) = answer
        .content_type
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        headers.insert(CONTENT_TYPE, value);
    }
    for cookie in answer.set_cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(_) => tracing::warn!("Dropping unrepresentable Set-Cookie from backend"),
        }
    }
    response
}

/// Forwards the request to the same path on the backend.
async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let cookie = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut request = ForwardRequest::new(method, uri.path())
        .query(uri.query().map(str::to_string))
        .cookie(cookie);
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let answer = state.backend.forward(request).await?;
    tracing::debug!("Backend answered {} for {}", answer.status, uri.path());
    Ok(relay(answer))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(forward))
        .route("/auth/logout", post(forward))
        .route("/auth/register", post(forward))
        .route("/auth/profile", get(forward))
        .route("/admin/agents", get(forward).post(forward))
        .route(
            "/admin/agents/{id}",
            get(forward).put(forward).patch(forward).delete(forward),
        )
}
