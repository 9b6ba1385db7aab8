use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

/// Branding served to the front end by `/api/app-info`.
#[derive(Debug, Clone)]
pub struct AppInfoConfig {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub public_api_url: String,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub backend_url: String,
    pub uploads_dir: PathBuf,
    pub static_dir: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub session_cookie: String,
    pub app_info: AppInfoConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("TD_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid TD_LISTEN_ADDR")?;
        let cors_allow = env_or("TD_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("TD_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);

        Ok(Self {
            listen_addr,
            db_path: env_or("TD_DB_PATH", "./db/tripdesk.db"),
            backend_url: env_or("TD_BACKEND_URL", "http://localhost:4000"),
            uploads_dir: PathBuf::from(env_or("TD_UPLOADS_DIR", "./uploads")),
            static_dir: env_or("TD_STATIC_DIR", "dist"),
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            session_cookie: env_or("TD_SESSION_COOKIE", "token"),
            app_info: AppInfoConfig {
                name: env_or("TD_APP_NAME", "TripDesk"),
                description: env_or("TD_APP_DESCRIPTION", "Omra back office"),
                logo: env_or("TD_APP_LOGO", "/logo.png"),
                public_api_url: env_or("TD_PUBLIC_API_URL", "/api"),
            },
        })
    }
}
