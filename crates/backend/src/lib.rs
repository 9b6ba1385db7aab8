//! Client for the external backend that owns agents and sessions.
//!
//! The back office never interprets auth or agent payloads: requests are
//! forwarded as-is and responses (status, body, `Set-Cookie`) relayed back.
//! The only payload it reads is the profile, to gate admin pages.

mod client;
mod models;

pub use client::{BackendClient, DEFAULT_TIMEOUT_SECS};
pub use models::{AgentProfile, AgentRole, BackendResponse, ForwardRequest};
