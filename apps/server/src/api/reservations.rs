use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tripdesk_core::{
    payments::{NewPayment, Payment},
    reservations::{NewReservation, Reservation, ReservationDetails, ReservationUpdate},
};

use crate::{
    api::uploads::remove_upload,
    error::{ApiQuery, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReservationsQuery {
    program_id: Option<String>,
}

async fn list_reservations(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<ReservationsQuery>,
) -> ApiResult<Json<Vec<Reservation>>> {
    let reservations = state
        .reservation_service
        .get_reservations(q.program_id.as_deref())?;
    Ok(Json(reservations))
}

async fn get_reservation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReservationDetails>> {
    Ok(Json(state.reservation_service.get_reservation_details(&id)?))
}

async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewReservation>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    let created = state.reservation_service.create_reservation(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_reservation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<ReservationUpdate>,
) -> ApiResult<Json<Reservation>> {
    payload.id = Some(id);
    let updated = state.reservation_service.update_reservation(payload).await?;
    Ok(Json(updated))
}

async fn delete_reservation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    // receipts go with the payments the cascade removes
    let receipts: Vec<String> = state
        .payment_service
        .get_payments_for_reservation(&id)?
        .into_iter()
        .filter_map(|p| p.file_path)
        .collect();
    state.reservation_service.delete_reservation(&id).await?;
    for receipt in receipts {
        remove_upload(&state.uploads_dir, &receipt).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_payments(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Payment>>> {
    Ok(Json(state.payment_service.get_payments_for_reservation(&id)?))
}

async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPayment>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    let created = state.payment_service.create_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_payment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let removed = state.payment_service.delete_payment(&id).await?;
    if let Some(receipt) = removed.file_path {
        remove_upload(&state.uploads_dir, &receipt).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .route("/reservations/{id}/payments", get(list_payments))
        .route("/payments", post(create_payment))
        .route("/payments/{id}", delete(delete_payment))
}
