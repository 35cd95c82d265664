//! Service catalog: categories and the services inside them.

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::catalog::{
    CreateServiceCategory, CreateServiceItem, ServiceCategory, ServiceItem, UpdateServiceCategory,
    UpdateServiceItem,
};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_categories(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<ServiceCategory>>>, ApiError> {
    let categories = state.provider.list_service_categories(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateServiceCategory>,
) -> Result<ResponseJson<ApiResponse<ServiceCategory>>, ApiError> {
    let category = state
        .provider
        .create_service_category(salon_id, payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path((_salon_id, category_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateServiceCategory>,
) -> Result<ResponseJson<ApiResponse<ServiceCategory>>, ApiError> {
    let category = state
        .provider
        .update_service_category(category_id, payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path((_salon_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_service_category(category_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_services(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<ServiceItem>>>, ApiError> {
    let services = state.provider.list_services(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(services)))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path((_salon_id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<ServiceItem>>, ApiError> {
    let service = state.provider.get_service(service_id).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

pub async fn create_service(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateServiceItem>,
) -> Result<ResponseJson<ApiResponse<ServiceItem>>, ApiError> {
    let service = state.provider.create_service(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

pub async fn update_service(
    State(state): State<AppState>,
    Path((_salon_id, service_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateServiceItem>,
) -> Result<ResponseJson<ApiResponse<ServiceItem>>, ApiError> {
    let service = state.provider.update_service(service_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(service)))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path((_salon_id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_service(service_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/salons/{salon_id}/service-categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/salons/{salon_id}/service-categories/{category_id}",
            axum::routing::put(update_category).delete(delete_category),
        )
        .route(
            "/salons/{salon_id}/services",
            get(list_services).post(create_service),
        )
        .route(
            "/salons/{salon_id}/services/{service_id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}
