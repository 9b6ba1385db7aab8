use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{AppInfoConfig, Config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tripdesk_backend::BackendClient;
use tripdesk_core::{
    balance::{BalanceService, BalanceServiceTrait},
    expenses::{ExpenseService, ExpenseServiceTrait},
    hotels::{HotelService, HotelServiceTrait},
    payments::{PaymentService, PaymentServiceTrait},
    programs::{ProgramService, ProgramServiceTrait},
    reservations::{ReservationService, ReservationServiceTrait},
};
use tripdesk_storage_sqlite::{
    db, ExpenseRepository, HotelRepository, PaymentRepository, ProgramRepository,
    ReservationRepository,
};

pub struct AppState {
    pub hotel_service: Arc<dyn HotelServiceTrait + Send + Sync>,
    pub program_service: Arc<dyn ProgramServiceTrait + Send + Sync>,
    pub reservation_service: Arc<dyn ReservationServiceTrait + Send + Sync>,
    pub payment_service: Arc<dyn PaymentServiceTrait + Send + Sync>,
    pub expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync>,
    pub balance_service: Arc<dyn BalanceServiceTrait + Send + Sync>,
    pub backend: BackendClient,
    pub uploads_dir: PathBuf,
    pub session_cookie: String,
    pub app_info: AppInfoConfig,
}

pub fn init_tracing() {
    let log_format = std::env::var("TD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let hotel_repo = Arc::new(HotelRepository::new(pool.clone(), writer.clone()));
    let program_repo = Arc::new(ProgramRepository::new(pool.clone(), writer.clone()));
    let reservation_repo = Arc::new(ReservationRepository::new(pool.clone(), writer.clone()));
    let payment_repo = Arc::new(PaymentRepository::new(pool.clone(), writer.clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));

    let hotel_service = Arc::new(HotelService::new(hotel_repo.clone()));
    let program_service = Arc::new(ProgramService::new(
        program_repo.clone(),
        hotel_repo,
        reservation_repo.clone(),
    ));
    let reservation_service = Arc::new(ReservationService::new(
        reservation_repo.clone(),
        program_repo.clone(),
        payment_repo.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        payment_repo.clone(),
        reservation_repo.clone(),
    ));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repo.clone(),
        program_repo.clone(),
        reservation_repo,
    ));
    let balance_service = Arc::new(BalanceService::new(payment_repo, expense_repo, program_repo));

    let backend = BackendClient::new(&config.backend_url, config.request_timeout)?;
    tracing::info!("Forwarding auth and agent routes to {}", backend.base_url());

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    Ok(Arc::new(AppState {
        hotel_service,
        program_service,
        reservation_service,
        payment_service,
        expense_service,
        balance_service,
        backend,
        uploads_dir: config.uploads_dir.clone(),
        session_cookie: config.session_cookie.clone(),
        app_info: config.app_info.clone(),
    }))
}
