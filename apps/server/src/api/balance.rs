use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tripdesk_core::balance::CashBalance;

use crate::{
    error::{ApiQuery, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceQuery {
    program_id: Option<String>,
}

async fn get_balance(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<BalanceQuery>,
) -> ApiResult<Json<CashBalance>> {
    let balance = state
        .balance_service
        .get_balance(q.program_id.as_deref())?;
    Ok(Json(balance))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/balance", get(get_balance))
}
