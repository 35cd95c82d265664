//! Tenant CRUD.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::salon::{CreateSalon, Salon, UpdateSalon};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_salons(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Salon>>>, ApiError> {
    let salons = state.provider.list_salons().await?;
    Ok(ResponseJson(ApiResponse::success(salons)))
}

pub async fn get_salon(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Salon>>, ApiError> {
    let salon = state.provider.get_salon(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(salon)))
}

pub async fn create_salon(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateSalon>,
) -> Result<ResponseJson<ApiResponse<Salon>>, ApiError> {
    let salon = state.provider.create_salon(payload).await?;
    Ok(ResponseJson(ApiResponse::success(salon)))
}

pub async fn update_salon(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateSalon>,
) -> Result<ResponseJson<ApiResponse<Salon>>, ApiError> {
    let salon = state.provider.update_salon(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(salon)))
}

pub async fn delete_salon(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_salon(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/salons", get(list_salons).post(create_salon))
        .route(
            "/salons/{salon_id}",
            get(get_salon).put(update_salon).delete(delete_salon),
        )
}
