//! HTTP client for the auth/agents backend.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::Method;
use std::time::Duration;

use tripdesk_core::errors::{Error, Result};

use crate::models::{AgentProfile, BackendResponse, ForwardRequest};

/// Default timeout for backend requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const PROFILE_PATH: &str = "/api/auth/profile";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(cookie: Option<&str>, with_body: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if with_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(value) = cookie.and_then(|c| HeaderValue::from_str(c).ok()) {
            headers.insert(COOKIE, value);
        }
        headers
    }

    /// Relays a request and returns the backend's answer whatever its status.
    ///
    /// Only transport failures are errors; they surface as `Error::Backend`.
    pub async fn forward(&self, request: ForwardRequest) -> Result<BackendResponse> {
        let mut url = format!("{}{}", self.base_url, request.path);
        if let Some(query) = &request.query {
            url = format!("{}?{}", url, query);
        }
        debug!("[Backend] {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(Self::headers(request.cookie.as_deref(), request.body.is_some()));
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Backend(format!("{} {}: {}", request.method, url, e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Backend(format!("Failed to read response: {}", e)))?
            .to_vec();

        Ok(BackendResponse {
            status,
            content_type,
            body,
            set_cookies,
        })
    }

    /// Profile of the session behind `cookie`, or `None` when the backend
    /// does not recognise it.
    pub async fn fetch_profile(&self, cookie: &str) -> Result<Option<AgentProfile>> {
        let response = self
            .forward(ForwardRequest::new(Method::GET, PROFILE_PATH).cookie(Some(cookie.to_string())))
            .await?;
        if !(200..300).contains(&response.status) {
            debug!("[Backend] profile lookup answered {}", response.status);
            return Ok(None);
        }
        Ok(response.json().and_then(AgentProfile::from_json))
    }
}
