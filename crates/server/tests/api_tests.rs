//! End-to-end API tests against the in-memory backend.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use db::models::booking::{Booking, BookingDetails};
use db::models::catalog::ServiceItem;
use db::models::client::Client;
use db::models::finance::{Expense, IncomeDetails};
use db::models::salon::Salon;
use db::models::worker::Worker;
use db::provider::LocalDataProvider;
use serde_json::json;
use server::{AppState, create_router};
use services::services::finance::FinanceSummary;
use services::services::stats::DashboardSummary;
use utils::response::ApiResponse;
use uuid::Uuid;

fn test_server() -> TestServer {
    let state = AppState::new(Arc::new(LocalDataProvider::new()));
    TestServer::new(create_router(state)).expect("test server")
}

async fn create_salon(server: &TestServer) -> Uuid {
    let response = server
        .post("/api/salons")
        .json(&json!({ "name": "Shear Genius" }))
        .await;
    response.assert_status_ok();
    response.json::<ApiResponse<Salon>>().data.unwrap().id
}

async fn create_client(server: &TestServer, salon_id: Uuid) -> Uuid {
    let response = server
        .post(&format!("/api/salons/{salon_id}/clients"))
        .json(&json!({ "name": "Ada" }))
        .await;
    response.assert_status_ok();
    response.json::<ApiResponse<Client>>().data.unwrap().id
}

async fn create_worker(server: &TestServer, salon_id: Uuid, name: &str) -> Uuid {
    let response = server
        .post(&format!("/api/salons/{salon_id}/workers"))
        .json(&json!({ "name": name }))
        .await;
    response.assert_status_ok();
    response.json::<ApiResponse<Worker>>().data.unwrap().id
}

async fn create_service(server: &TestServer, salon_id: Uuid) -> Uuid {
    let response = server
        .post(&format!("/api/salons/{salon_id}/services"))
        .json(&json!({ "name": "Cut", "durationMinutes": 45, "price": 30.0 }))
        .await;
    response.assert_status_ok();
    response.json::<ApiResponse<ServiceItem>>().data.unwrap().id
}

async fn create_booking(
    server: &TestServer,
    salon_id: Uuid,
    client_id: Uuid,
    worker_id: Uuid,
    service_id: Uuid,
    starts_at: &str,
    ends_at: &str,
) -> axum_test::TestResponse {
    server
        .post(&format!("/api/salons/{salon_id}/bookings"))
        .json(&json!({
            "clientId": client_id,
            "workerIds": [worker_id],
            "serviceIds": [service_id],
            "startsAt": starts_at,
            "endsAt": ends_at,
        }))
        .await
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body = response.json::<ApiResponse<String>>();
    assert!(body.success);
    assert_eq!(body.data.as_deref(), Some("ok"));
}

#[tokio::test]
async fn salon_crud_over_http() {
    let server = test_server();
    let salon_id = create_salon(&server).await;

    let listed = server.get("/api/salons").await;
    listed.assert_status_ok();
    assert_eq!(
        listed.json::<ApiResponse<Vec<Salon>>>().data.unwrap().len(),
        1
    );

    let updated = server
        .put(&format!("/api/salons/{salon_id}"))
        .json(&json!({ "name": "Shear Genius II" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(
        updated.json::<ApiResponse<Salon>>().data.unwrap().name,
        "Shear Genius II"
    );

    server
        .delete(&format!("/api/salons/{salon_id}"))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/salons/{salon_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_entities_return_404_with_error_envelope() {
    let server = test_server();
    let response = server.get(&format!("/api/salons/{}", Uuid::new_v4())).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<ApiResponse<Salon>>();
    assert!(!body.success);
    assert!(body.data.is_none());
    assert!(body.message.unwrap().contains("not found"));
}

#[tokio::test]
async fn double_booking_a_worker_is_a_409() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let client_id = create_client(&server, salon_id).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;
    let service_id = create_service(&server, salon_id).await;

    let first = create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T10:00:00Z",
        "2026-05-04T11:00:00Z",
    )
    .await;
    first.assert_status_ok();

    let overlapping = create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T10:30:00Z",
        "2026-05-04T11:30:00Z",
    )
    .await;
    overlapping.assert_status(StatusCode::CONFLICT);
    assert!(!overlapping.json::<ApiResponse<Booking>>().success);

    let adjacent = create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T11:00:00Z",
        "2026-05-04T12:00:00Z",
    )
    .await;
    adjacent.assert_status_ok();
}

#[tokio::test]
async fn updating_a_booking_onto_an_occupied_slot_is_a_409() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let client_id = create_client(&server, salon_id).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;
    let service_id = create_service(&server, salon_id).await;

    create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T10:00:00Z",
        "2026-05-04T11:00:00Z",
    )
    .await
    .assert_status_ok();

    let second = create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T14:00:00Z",
        "2026-05-04T15:00:00Z",
    )
    .await;
    second.assert_status_ok();
    let second_id = second.json::<ApiResponse<Booking>>().data.unwrap().id;

    let moved = server
        .put(&format!("/api/salons/{salon_id}/bookings/{second_id}"))
        .json(&json!({
            "startsAt": "2026-05-04T10:30:00Z",
            "endsAt": "2026-05-04T11:30:00Z",
        }))
        .await;
    moved.assert_status(StatusCode::CONFLICT);

    let inverted = server
        .put(&format!("/api/salons/{salon_id}/bookings/{second_id}"))
        .json(&json!({
            "startsAt": "2026-05-04T15:00:00Z",
            "endsAt": "2026-05-04T14:00:00Z",
        }))
        .await;
    inverted.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let fetched = server
        .get(&format!("/api/salons/{salon_id}/bookings/{second_id}"))
        .await;
    fetched.assert_status_ok();
    let details = fetched.json::<ApiResponse<BookingDetails>>().data.unwrap();
    assert_eq!(
        details.starts_at.to_rfc3339(),
        "2026-05-04T14:00:00+00:00"
    );
}

#[tokio::test]
async fn inverted_booking_window_is_a_422() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let client_id = create_client(&server, salon_id).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;
    let service_id = create_service(&server, salon_id).await;

    let response = create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T11:00:00Z",
        "2026-05-04T10:00:00Z",
    )
    .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn cancelled_booking_cannot_be_completed_over_http() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let client_id = create_client(&server, salon_id).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;
    let service_id = create_service(&server, salon_id).await;

    let booking = create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T10:00:00Z",
        "2026-05-04T11:00:00Z",
    )
    .await
    .json::<ApiResponse<Booking>>()
    .data
    .unwrap();

    server
        .put(&format!(
            "/api/salons/{salon_id}/bookings/{}/status",
            booking.id
        ))
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status_ok();

    server
        .put(&format!(
            "/api/salons/{salon_id}/bookings/{}/status",
            booking.id
        ))
        .json(&json!({ "status": "completed" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn agenda_lists_the_day_in_order() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let client_id = create_client(&server, salon_id).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;
    let service_id = create_service(&server, salon_id).await;

    for (start, end) in [
        ("2026-05-04T14:00:00Z", "2026-05-04T15:00:00Z"),
        ("2026-05-04T09:00:00Z", "2026-05-04T10:00:00Z"),
        ("2026-05-05T09:00:00Z", "2026-05-05T10:00:00Z"),
    ] {
        create_booking(&server, salon_id, client_id, worker_id, service_id, start, end)
            .await
            .assert_status_ok();
    }

    let response = server
        .get(&format!(
            "/api/salons/{salon_id}/bookings/agenda?date=2026-05-04"
        ))
        .await;
    response.assert_status_ok();
    let agenda = response
        .json::<ApiResponse<Vec<BookingDetails>>>()
        .data
        .unwrap();
    assert_eq!(agenda.len(), 2);
    assert!(agenda[0].starts_at < agenda[1].starts_at);
    assert_eq!(agenda[0].client.name, "Ada");
}

#[tokio::test]
async fn income_splits_must_add_up_to_one_hundred() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;

    let invalid = server
        .post(&format!("/api/salons/{salon_id}/incomes"))
        .json(&json!({
            "amount": 100.0,
            "recordedOn": "2026-05-04",
            "splits": [{ "workerId": worker_id, "percentage": 90.0 }],
        }))
        .await;
    invalid.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let valid = server
        .post(&format!("/api/salons/{salon_id}/incomes"))
        .json(&json!({
            "amount": 100.0,
            "method": "card",
            "recordedOn": "2026-05-04",
            "splits": [{ "workerId": worker_id, "percentage": 100.0 }],
        }))
        .await;
    valid.assert_status_ok();
    let income = valid.json::<ApiResponse<IncomeDetails>>().data.unwrap();
    assert_eq!(income.splits.len(), 1);
}

#[tokio::test]
async fn finance_summary_nets_income_against_expenses() {
    let server = test_server();
    let salon_id = create_salon(&server).await;

    server
        .post(&format!("/api/salons/{salon_id}/incomes"))
        .json(&json!({ "amount": 100.0, "method": "card", "recordedOn": "2026-05-04" }))
        .await
        .assert_status_ok();
    server
        .post(&format!("/api/salons/{salon_id}/incomes"))
        .json(&json!({ "amount": 50.0, "recordedOn": "2026-05-10" }))
        .await
        .assert_status_ok();
    let expense = server
        .post(&format!("/api/salons/{salon_id}/expenses"))
        .json(&json!({ "amount": 40.0, "incurredOn": "2026-05-06", "description": "towels" }))
        .await;
    expense.assert_status_ok();
    assert_eq!(
        expense
            .json::<ApiResponse<Expense>>()
            .data
            .unwrap()
            .description
            .as_deref(),
        Some("towels")
    );

    let response = server
        .get(&format!("/api/salons/{salon_id}/finance/summary"))
        .await;
    response.assert_status_ok();
    let summary = response.json::<ApiResponse<FinanceSummary>>().data.unwrap();
    assert_eq!(summary.total_income, 150.0);
    assert_eq!(summary.total_expense, 40.0);
    assert_eq!(summary.net, 110.0);

    // Range-bound summary only sees the first income.
    let response = server
        .get(&format!(
            "/api/salons/{salon_id}/finance/summary?from=2026-05-01&to=2026-05-05"
        ))
        .await;
    let summary = response.json::<ApiResponse<FinanceSummary>>().data.unwrap();
    assert_eq!(summary.total_income, 100.0);
    assert_eq!(summary.total_expense, 0.0);
}

#[tokio::test]
async fn nonpositive_amounts_are_rejected() {
    let server = test_server();
    let salon_id = create_salon(&server).await;

    server
        .post(&format!("/api/salons/{salon_id}/incomes"))
        .json(&json!({ "amount": 0.0, "recordedOn": "2026-05-04" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    server
        .post(&format!("/api/salons/{salon_id}/expenses"))
        .json(&json!({ "amount": -3.0, "incurredOn": "2026-05-04" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn dashboard_counts_the_day_and_month() {
    let server = test_server();
    let salon_id = create_salon(&server).await;
    let client_id = create_client(&server, salon_id).await;
    let worker_id = create_worker(&server, salon_id, "Marta").await;
    let service_id = create_service(&server, salon_id).await;

    create_booking(
        &server,
        salon_id,
        client_id,
        worker_id,
        service_id,
        "2026-05-04T10:00:00Z",
        "2026-05-04T11:00:00Z",
    )
    .await
    .assert_status_ok();
    server
        .post(&format!("/api/salons/{salon_id}/incomes"))
        .json(&json!({ "amount": 80.0, "recordedOn": "2026-05-04" }))
        .await
        .assert_status_ok();
    server
        .post(&format!("/api/salons/{salon_id}/expenses"))
        .json(&json!({ "amount": 30.0, "incurredOn": "2026-05-20" }))
        .await
        .assert_status_ok();

    let response = server
        .get(&format!(
            "/api/salons/{salon_id}/stats/dashboard?date=2026-05-04"
        ))
        .await;
    response.assert_status_ok();
    let dashboard = response
        .json::<ApiResponse<DashboardSummary>>()
        .data
        .unwrap();
    assert_eq!(dashboard.today_bookings, 1);
    assert_eq!(dashboard.month_income, 80.0);
    assert_eq!(dashboard.month_expense, 30.0);
    assert_eq!(dashboard.month_net, 50.0);
    assert_eq!(dashboard.client_count, 1);
    assert_eq!(dashboard.active_worker_count, 1);
}
