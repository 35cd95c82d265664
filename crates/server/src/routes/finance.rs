//! Income, expense and expense-category endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use chrono::NaiveDate;
use db::{
    models::finance::{
        CreateExpense, CreateExpenseCategory, CreateIncome, Expense, ExpenseCategory,
        IncomeDetails, UpdateExpense, UpdateExpenseCategory,
    },
    provider::DateRange,
};
use serde::Deserialize;
use services::services::finance::FinanceSummary;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl From<DateRangeQuery> for DateRange {
    fn from(query: DateRangeQuery) -> Self {
        DateRange {
            from: query.from,
            to: query.to,
        }
    }
}

pub async fn list_incomes(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<IncomeDetails>>>, ApiError> {
    let incomes = state.provider.list_incomes(salon_id, query.into()).await?;
    Ok(ResponseJson(ApiResponse::success(incomes)))
}

pub async fn get_income(
    State(state): State<AppState>,
    Path((_salon_id, income_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<IncomeDetails>>, ApiError> {
    let income = state.provider.get_income_details(income_id).await?;
    Ok(ResponseJson(ApiResponse::success(income)))
}

pub async fn create_income(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateIncome>,
) -> Result<ResponseJson<ApiResponse<IncomeDetails>>, ApiError> {
    let income = state.finance.record_income(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(income)))
}

pub async fn delete_income(
    State(state): State<AppState>,
    Path((_salon_id, income_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_income(income_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_expense_categories(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Vec<ExpenseCategory>>>, ApiError> {
    let categories = state.provider.list_expense_categories(salon_id).await?;
    Ok(ResponseJson(ApiResponse::success(categories)))
}

pub async fn create_expense_category(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateExpenseCategory>,
) -> Result<ResponseJson<ApiResponse<ExpenseCategory>>, ApiError> {
    let category = state
        .provider
        .create_expense_category(salon_id, payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn update_expense_category(
    State(state): State<AppState>,
    Path((_salon_id, category_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateExpenseCategory>,
) -> Result<ResponseJson<ApiResponse<ExpenseCategory>>, ApiError> {
    let category = state
        .provider
        .update_expense_category(category_id, payload)
        .await?;
    Ok(ResponseJson(ApiResponse::success(category)))
}

pub async fn delete_expense_category(
    State(state): State<AppState>,
    Path((_salon_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_expense_category(category_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Expense>>>, ApiError> {
    let expenses = state.provider.list_expenses(salon_id, query.into()).await?;
    Ok(ResponseJson(ApiResponse::success(expenses)))
}

pub async fn create_expense(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    axum::Json(payload): axum::Json<CreateExpense>,
) -> Result<ResponseJson<ApiResponse<Expense>>, ApiError> {
    let expense = state.finance.record_expense(salon_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(expense)))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path((_salon_id, expense_id)): Path<(Uuid, Uuid)>,
    axum::Json(payload): axum::Json<UpdateExpense>,
) -> Result<ResponseJson<ApiResponse<Expense>>, ApiError> {
    let expense = state.finance.update_expense(expense_id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(expense)))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path((_salon_id, expense_id)): Path<(Uuid, Uuid)>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.provider.delete_expense(expense_id).await?;
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn summary(
    State(state): State<AppState>,
    Path(salon_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Result<ResponseJson<ApiResponse<FinanceSummary>>, ApiError> {
    let summary = state.finance.summary(salon_id, query.into()).await?;
    Ok(ResponseJson(ApiResponse::success(summary)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/salons/{salon_id}/incomes",
            get(list_incomes).post(create_income),
        )
        .route(
            "/salons/{salon_id}/incomes/{income_id}",
            get(get_income).delete(delete_income),
        )
        .route(
            "/salons/{salon_id}/expense-categories",
            get(list_expense_categories).post(create_expense_category),
        )
        .route(
            "/salons/{salon_id}/expense-categories/{category_id}",
            axum::routing::put(update_expense_category).delete(delete_expense_category),
        )
        .route(
            "/salons/{salon_id}/expenses",
            get(list_expenses).post(create_expense),
        )
        .route(
            "/salons/{salon_id}/expenses/{expense_id}",
            axum::routing::put(update_expense).delete(delete_expense),
        )
        .route("/salons/{salon_id}/finance/summary", get(summary))
}
