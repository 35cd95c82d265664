use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use services::services::stats::{DashboardSummary, TeamMemberStats};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError, routes::finance::DateRangeQuery};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<NaiveDate>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<DashboardQuery>,
) -> Result<ResponseJson<ApiResponse<DashboardSummary>>, ApiError> {
    let today = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let summary = state.stats.dashboard(salon_id, today).await?;
    Ok(ResponseJson(ApiResponse::success(summary)))
}

pub async fn team_performance(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<TeamMemberStats>>>, ApiError> {
    let stats = state.stats.team_performance(salon_id, query.into()).await?;
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/salons/{salon_id}/stats/dashboard", get(dashboard))
        .route("/salons/{salon_id}/stats/team", get(team_performance))
}
