use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tripdesk_core::hotels::{Hotel, HotelUpdate, NewHotel};

use crate::{
    error::{ApiQuery, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct HotelsQuery {
    city: Option<String>,
}

async fn list_hotels(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<HotelsQuery>,
) -> ApiResult<Json<Vec<Hotel>>> {
    let hotels = state.hotel_service.get_hotels(q.city.as_deref())?;
    Ok(Json(hotels))
}

async fn get_hotel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Hotel>> {
    Ok(Json(state.hotel_service.get_hotel(&id)?))
}

async fn create_hotel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewHotel>,
) -> ApiResult<(StatusCode, Json<Hotel>)> {
    let created = state.hotel_service.create_hotel(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_hotel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<HotelUpdate>,
) -> ApiResult<Json<Hotel>> {
    payload.id = Some(id);
    let updated = state.hotel_service.update_hotel(payload).await?;
    Ok(Json(updated))
}

async fn delete_hotel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.hotel_service.delete_hotel(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hotels", get(list_hotels).post(create_hotel))
        .route(
            "/hotels/{id}",
            get(get_hotel).put(update_hotel).delete(delete_hotel),
        )
}
