use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tripdesk_core::expenses::{
    Expense, ExpenseFilter, ExpenseListResponse, ExpenseStats, ExpenseUpdate, NewExpense,
};

use crate::{
    error::{ApiQuery, ApiResult},
    main_lib::AppState,
};

/// Query string of the listing and stats endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseQuery {
    search: Option<String>,
    program: Option<String>,
    program_id: Option<String>,
    #[serde(rename = "type")]
    expense_type: Option<String>,
    status: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

impl ExpenseQuery {
    fn filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            search: self.search.clone(),
            program: self.program.clone(),
            program_id: self.program_id.clone(),
            expense_type: self.expense_type.clone(),
            status: self.status.clone(),
        }
    }
}

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<ExpenseQuery>,
) -> ApiResult<Json<ExpenseListResponse>> {
    let listing = state
        .expense_service
        .search_expenses(q.filter(), q.page, q.limit)?;
    Ok(Json(listing))
}

async fn get_expense_stats(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<ExpenseQuery>,
) -> ApiResult<Json<ExpenseStats>> {
    let stats = state.expense_service.get_expense_stats(q.filter())?;
    Ok(Json(stats))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Expense>> {
    Ok(Json(state.expense_service.get_expense(&id)?))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let created = state.expense_service.create_expense(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<ExpenseUpdate>,
) -> ApiResult<Json<Expense>> {
    payload.id = Some(id);
    let updated = state.expense_service.update_expense(payload).await?;
    Ok(Json(updated))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.expense_service.delete_expense(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/stats", get(get_expense_stats))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}
