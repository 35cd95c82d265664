use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::provider::ProviderError;
use services::services::{booking::BookingError, finance::FinanceError, stats::StatsError};
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

fn provider_status(err: &ProviderError) -> StatusCode {
    match err {
        ProviderError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Provider(err) => provider_status(err),
            ApiError::Booking(err) => match err {
                BookingError::Conflict { .. } => StatusCode::CONFLICT,
                BookingError::InvalidWindow
                | BookingError::NoWorkers
                | BookingError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                BookingError::Provider(inner) => provider_status(inner),
            },
            ApiError::Finance(err) => match err {
                FinanceError::NonPositiveAmount
                | FinanceError::NonPositiveSplit
                | FinanceError::SplitsDontAddUp { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                FinanceError::Provider(inner) => provider_status(inner),
            },
            ApiError::Stats(StatsError::Provider(inner)) => provider_status(inner),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
