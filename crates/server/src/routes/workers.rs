use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::worker::{CreateWorker, UpdateWorker, Worker};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_workers(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<Worker>>>, ApiError> {
    let workers = state.provider.list_workers(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(workers)))
}

pub async fn get_worker(
    State(state): State<AppState>,
    Path((_salon_id, worker_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<Worker>>, ApiError> {
    let worker = state.provider.get_worker(worker_id).await?;
    Ok(ResponseJson(ApiResponse::success(worker)))
}

pub async fn create_worker(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateWorker>,
) -> Result<ResponseJson<ApiResponse<Worker>>, ApiError> {
    let worker = state.provider.create_worker(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(worker)))
}

pub async fn update_worker(
    State(state): State<AppState>,
    Path((_salon_id, worker_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateWorker>,
) -> Result<ResponseJson<ApiResponse<Worker>>, ApiError> {
    let worker = state.provider.update_worker(worker_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(worker)))
}

pub async fn delete_worker(
    State(state): State<AppState>,
    Path((_salon_id, worker_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_worker(worker_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/salons/{salon_id}/workers",
            get(list_workers).post(create_worker),
        )
        .route(
            "/salons/{salon_id}/workers/{worker_id}",
            get(get_worker).put(update_worker).delete(delete_worker),
        )
}
