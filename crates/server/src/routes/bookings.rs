//! Booking endpoints: CRUD plus scheduling, status transitions and the
//! day agenda.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use chrono::{DateTime, NaiveDate, Utc};
use db::{
    models::booking::{Booking, BookingDetails, BookingStatus, CreateBooking, UpdateBooking},
    provider::TimeRange,
};
use serde::Deserialize;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct BookingRangeQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct AgendaQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<BookingRangeQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Booking>>>, ApiError> {
    let bookings = state
        .provider
        .list_bookings(
            salon_id,
            TimeRange {
                from: query.from,
                to: query.to,
            },
        )
        .await?;
    Ok(ResponseJson(ApiResponse::success(bookings)))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path((_salon_id, booking_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<BookingDetails>>, ApiError> {
    let details = state.provider.get_booking_details(booking_id).await?;
    Ok(ResponseJson(ApiResponse::success(details)))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateBooking>,
) -> Result<ResponseJson<ApiResponse<Booking>>, ApiError> {
    let booking = state.bookings.schedule(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(booking)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    Path((_salon_id, booking_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateBooking>,
) -> Result<ResponseJson<ApiResponse<Booking>>, ApiError> {
    let booking = state.bookings.update(booking_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(booking)))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path((_salon_id, booking_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_booking(booking_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path((_salon_id, booking_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<SetStatusRequest>,
) -> Result<ResponseJson<ApiResponse<Booking>>, ApiError> {
    let booking = state.bookings.set_status(booking_id, payload.status).await?;
    Ok(ResponseJson(ApiResponse::success(booking)))
}

pub async fn reschedule(
    State(state): State<AppState>,
    Path((_salon_id, booking_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<RescheduleRequest>,
) -> Result<ResponseJson<ApiResponse<Booking>>, ApiError> {
    let booking = state
        .bookings
        .reschedule(booking_id, payload.starts_at, payload.ends_at)
        .await?;
    Ok(ResponseJson(ApiResponse::success(booking)))
}

pub async fn agenda(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<AgendaQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<BookingDetails>>>, ApiError> {
    let agenda = state.bookings.agenda(salon_id, query.date).await?;
    Ok(ResponseJson(ApiResponse::success(agenda)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/salons/{salon_id}/bookings",
            get(list_bookings).post(create_booking),
        )
        .route("/salons/{salon_id}/bookings/agenda", get(agenda))
        .route(
            "/salons/{salon_id}/bookings/{booking_id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/salons/{salon_id}/bookings/{booking_id}/status", put(set_status))
        .route(
            "/salons/{salon_id}/bookings/{booking_id}/reschedule",
            put(reschedule),
        )
}
