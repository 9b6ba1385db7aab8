use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Request to relay to the backend, path included verbatim.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl ForwardRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            cookie: None,
            body: None,
        }
    }

    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }
}

/// What came back from the backend, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub set_cookies: Vec<String>,
}

impl BackendResponse {
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Admin,
    #[default]
    #[serde(other)]
    Agent,
}

/// Subset of the profile payload the gate needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: AgentRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AgentProfile {
    pub fn is_admin(&self) -> bool {
        self.role == AgentRole::Admin && self.is_active
    }

    /// Accepts either a bare profile or one wrapped in `{"user": …}`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        let inner = match value {
            serde_json::Value::Object(mut map) if map.get("user").is_some_and(|u| u.is_object()) => {
                map.remove("user")?
            }
            other => other,
        };
        serde_json::from_value(inner).ok()
    }
}
