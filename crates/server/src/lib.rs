pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use db::provider::DataProvider;
use services::services::{booking::BookingService, finance::FinanceService, stats::StatsService};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub bookings: BookingService,
    pub finance: FinanceService,
    pub stats: StatsService,
}

impl AppState {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            bookings: BookingService::new(provider.clone()),
            finance: FinanceService::new(provider.clone()),
            stats: StatsService::new(provider.clone()),
            provider,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::salons::router())
        .merge(routes::workers::router())
        .merge(routes::clients::router())
        .merge(routes::catalog::router())
        .merge(routes::bookings::router())
        .merge(routes::finance::router())
        .merge(routes::stats::router());

    Router::new()
        .nest("/api", api)
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
