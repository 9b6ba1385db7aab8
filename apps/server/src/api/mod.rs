use std::sync::Arc;

use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth::require_session, config::Config, main_lib::AppState};

mod balance;
mod expenses;
mod hotels;
mod programs;
mod proxy;
mod reservations;
pub mod uploads;

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppInfo {
    name: String,
    description: String,
    logo: String,
    public_api_url: String,
}

async fn app_info(State(state): State<Arc<AppState>>) -> Json<AppInfo> {
    let info = &state.app_info;
    Json(AppInfo {
        name: info.name.clone(),
        description: info.description.clone(),
        logo: info.logo.clone(),
        public_api_url: info.public_api_url.clone(),
    })
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/app-info", get(app_info))
        .merge(expenses::router())
        .merge(hotels::router())
        .merge(programs::router())
        .merge(reservations::router())
        .merge(balance::router())
        .merge(uploads::router())
        .merge(proxy::router());

    let static_dir = std::path::PathBuf::from(&config.static_dir);
    let index_file = static_dir.join("index.html");
    let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));

    Router::new()
        .nest("/api", api)
        .nest_service(uploads::UPLOADS_ROUTE, ServeDir::new(&config.uploads_dir))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
