use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::client::{Client, CreateClient, UpdateClient};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_clients(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<Client>>>, ApiError> {
    let clients = state.provider.list_clients(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(clients)))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path((_salon_id, client_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<Client>>, ApiError> {
    let client = state.provider.get_client(client_id).await?;
    Ok(ResponseJson(ApiResponse::success(client)))
}

pub async fn create_client(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateClient>,
) -> Result<ResponseJson<ApiResponse<Client>>, ApiError> {
    let client = state.provider.create_client(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(client)))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path((_salon_id, client_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateClient>,
) -> Result<ResponseJson<ApiResponse<Client>>, ApiError> {
    let client = state.provider.update_client(client_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(client)))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path((_salon_id, client_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_client(client_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/salons/{salon_id}/clients",
            get(list_clients).post(create_client),
        )
        .route(
            "/salons/{salon_id}/clients/{client_id}",
            get(get_client).put(update_client).delete(delete_client),
        )
}
