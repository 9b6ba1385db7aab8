use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tripdesk_core::programs::{NewProgram, Program, ProgramUpdate};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_programs(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Program>>> {
    Ok(Json(state.program_service.get_programs()?))
}

async fn get_program(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Program>> {
    Ok(Json(state.program_service.get_program(&id)?))
}

async fn create_program(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProgram>,
) -> ApiResult<(StatusCode, Json<Program>)> {
    let created = state.program_service.create_program(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_program(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<ProgramUpdate>,
) -> ApiResult<Json<Program>> {
    payload.id = Some(id);
    let updated = state.program_service.update_program(payload).await?;
    Ok(Json(updated))
}

async fn delete_program(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.program_service.delete_program(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/programs", get(list_programs).post(create_program))
        .route(
            "/programs/{id}",
            get(get_program).put(update_program).delete(delete_program),
        )
}
