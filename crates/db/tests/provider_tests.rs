//! Conformance suite: every scenario runs against both backends and must
//! observe the same results.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use db::DBService;
use db::models::booking::{BookingStatus, CreateBooking, UpdateBooking};
use db::models::catalog::{CreateServiceCategory, CreateServiceItem, UpdateServiceItem};
use db::models::client::CreateClient;
use db::models::finance::{
    CreateExpense, CreateExpenseCategory, CreateIncome, CreateIncomeSplit, PaymentMethod,
    UpdateExpense,
};
use db::models::salon::{CreateSalon, UpdateSalon};
use db::models::worker::{CreateWorker, UpdateWorker, WorkerRole};
use db::provider::{
    DataProvider, DateRange, LocalDataProvider, ProviderError, SqlDataProvider, TimeRange,
};
use tempfile::TempDir;
use uuid::Uuid;

struct Backend {
    name: &'static str,
    provider: Arc<dyn DataProvider>,
    // Keeps the sqlite file alive for the duration of the test.
    _dir: Option<TempDir>,
}

async fn backends() -> Vec<Backend> {
    let dir = TempDir::new().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("conformance.db").display());
    let db = DBService::new(&url).await.expect("migrated sqlite pool");

    vec![
        Backend {
            name: "local",
            provider: Arc::new(LocalDataProvider::new()),
            _dir: None,
        },
        Backend {
            name: "sql",
            provider: Arc::new(SqlDataProvider::new(db.pool)),
            _dir: Some(dir),
        },
    ]
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, day, hour, 0, 0).unwrap()
}

fn on(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, day).unwrap()
}

async fn seed_salon(p: &Arc<dyn DataProvider>) -> Uuid {
    p.create_salon(CreateSalon {
        name: "Shear Genius".into(),
        currency: None,
        timezone: None,
    })
    .await
    .expect("create salon")
    .id
}

async fn seed_worker(p: &Arc<dyn DataProvider>, salon_id: Uuid, name: &str) -> Uuid {
    p.create_worker(
        salon_id,
        CreateWorker {
            name: name.into(),
            email: None,
            phone: None,
            role: None,
            color: None,
        },
    )
    .await
    .expect("create worker")
    .id
}

async fn seed_client(p: &Arc<dyn DataProvider>, salon_id: Uuid, name: &str) -> Uuid {
    p.create_client(
        salon_id,
        CreateClient {
            name: name.into(),
            email: None,
            phone: None,
            notes: None,
        },
    )
    .await
    .expect("create client")
    .id
}

async fn seed_service(p: &Arc<dyn DataProvider>, salon_id: Uuid, name: &str) -> Uuid {
    p.create_service(
        salon_id,
        CreateServiceItem {
            category_id: None,
            name: name.into(),
            duration_minutes: 30,
            price: 25.0,
        },
    )
    .await
    .expect("create service")
    .id
}

async fn seed_booking(
    p: &Arc<dyn DataProvider>,
    salon_id: Uuid,
    client_id: Uuid,
    worker_id: Uuid,
    service_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Uuid {
    p.create_booking(
        salon_id,
        CreateBooking {
            client_id,
            worker_ids: vec![worker_id],
            service_ids: vec![service_id],
            starts_at,
            ends_at,
            status: Some(BookingStatus::Confirmed),
            notes: None,
        },
    )
    .await
    .expect("create booking")
    .id
}

fn assert_not_found<T: std::fmt::Debug>(result: db::provider::Result<T>, backend: &str) {
    match result {
        Err(ProviderError::NotFound { .. }) => {}
        other => panic!("[{backend}] expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn salon_crud() {
    for b in backends().await {
        let p = &b.provider;
        let salon = p
            .create_salon(CreateSalon {
                name: "Clip Joint".into(),
                currency: Some("USD".into()),
                timezone: Some("America/New_York".into()),
            })
            .await
            .unwrap();
        assert_eq!(salon.currency, "USD", "[{}]", b.name);

        let fetched = p.get_salon(salon.id).await.unwrap();
        assert_eq!(fetched.name, "Clip Joint", "[{}]", b.name);

        let updated = p
            .update_salon(
                salon.id,
                UpdateSalon {
                    name: Some("Clip Joint II".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Clip Joint II", "[{}]", b.name);
        assert_eq!(updated.currency, "USD", "[{}]", b.name);

        assert_eq!(p.list_salons().await.unwrap().len(), 1, "[{}]", b.name);

        p.delete_salon(salon.id).await.unwrap();
        assert_not_found(p.get_salon(salon.id).await, b.name);
        assert_not_found(p.delete_salon(salon.id).await, b.name);
    }
}

#[tokio::test]
async fn defaults_apply_on_create() {
    for b in backends().await {
        let p = &b.provider;
        let salon = p
            .create_salon(CreateSalon {
                name: "Defaults".into(),
                currency: None,
                timezone: None,
            })
            .await
            .unwrap();
        assert_eq!(salon.currency, "EUR", "[{}]", b.name);
        assert_eq!(salon.timezone, "UTC", "[{}]", b.name);

        let worker = p
            .create_worker(
                salon.id,
                CreateWorker {
                    name: "Ana".into(),
                    email: None,
                    phone: None,
                    role: None,
                    color: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(worker.role, WorkerRole::Stylist, "[{}]", b.name);
        assert!(worker.active, "[{}]", b.name);
    }
}

#[tokio::test]
async fn workers_are_scoped_to_their_salon_and_sorted_by_name() {
    for b in backends().await {
        let p = &b.provider;
        let salon_a = seed_salon(p).await;
        let salon_b = seed_salon(p).await;
        seed_worker(p, salon_a, "Zoe").await;
        seed_worker(p, salon_a, "Ana").await;
        seed_worker(p, salon_b, "Mia").await;

        let names: Vec<String> = p
            .list_workers(salon_a)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Zoe"], "[{}]", b.name);
        assert_eq!(p.list_workers(salon_b).await.unwrap().len(), 1, "[{}]", b.name);
    }
}

#[tokio::test]
async fn worker_update_and_deactivation() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let worker_id = seed_worker(p, salon_id, "Ana").await;

        let updated = p
            .update_worker(
                worker_id,
                UpdateWorker {
                    role: Some(WorkerRole::Manager),
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, WorkerRole::Manager, "[{}]", b.name);
        assert!(!updated.active, "[{}]", b.name);
        assert_eq!(updated.name, "Ana", "[{}]", b.name);

        p.delete_worker(worker_id).await.unwrap();
        assert_not_found(p.get_worker(worker_id).await, b.name);
    }
}

#[tokio::test]
async fn empty_update_is_a_no_op() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let before = p.get_client(client_id).await.unwrap();

        let after = p
            .update_client(client_id, Default::default())
            .await
            .unwrap();
        assert_eq!(after.name, before.name, "[{}]", b.name);
        assert_eq!(after.email, before.email, "[{}]", b.name);
        assert_eq!(after.notes, before.notes, "[{}]", b.name);
        assert_eq!(after.updated_at, before.updated_at, "[{}]", b.name);
    }
}

#[tokio::test]
async fn lists_of_an_unknown_salon_are_empty() {
    for b in backends().await {
        let p = &b.provider;
        // Seed a real salon with data so the scoping is actually exercised.
        let salon_id = seed_salon(p).await;
        seed_worker(p, salon_id, "Marta").await;
        seed_client(p, salon_id, "Ada").await;

        let stranger = Uuid::new_v4();
        assert!(p.list_workers(stranger).await.unwrap().is_empty(), "[{}]", b.name);
        assert!(p.list_clients(stranger).await.unwrap().is_empty(), "[{}]", b.name);
        assert!(
            p.list_service_categories(stranger).await.unwrap().is_empty(),
            "[{}]",
            b.name
        );
        assert!(p.list_services(stranger).await.unwrap().is_empty(), "[{}]", b.name);
        assert!(
            p.list_bookings(stranger, TimeRange::default()).await.unwrap().is_empty(),
            "[{}]",
            b.name
        );
        assert!(
            p.list_incomes(stranger, DateRange::default()).await.unwrap().is_empty(),
            "[{}]",
            b.name
        );
        assert!(
            p.list_expense_categories(stranger).await.unwrap().is_empty(),
            "[{}]",
            b.name
        );
        assert!(
            p.list_expenses(stranger, DateRange::default()).await.unwrap().is_empty(),
            "[{}]",
            b.name
        );
    }
}

#[tokio::test]
async fn categories_sort_by_position_then_name() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        for (name, position) in [("Color", Some(2)), ("Cuts", Some(1)), ("Beard", Some(2))] {
            p.create_service_category(
                salon_id,
                CreateServiceCategory {
                    name: name.into(),
                    position,
                },
            )
            .await
            .unwrap();
        }

        let names: Vec<String> = p
            .list_service_categories(salon_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Cuts", "Beard", "Color"], "[{}]", b.name);
    }
}

#[tokio::test]
async fn deleting_a_category_detaches_its_services() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let category = p
            .create_service_category(
                salon_id,
                CreateServiceCategory {
                    name: "Cuts".into(),
                    position: None,
                },
            )
            .await
            .unwrap();
        let service = p
            .create_service(
                salon_id,
                CreateServiceItem {
                    category_id: Some(category.id),
                    name: "Trim".into(),
                    duration_minutes: 20,
                    price: 15.0,
                },
            )
            .await
            .unwrap();

        p.delete_service_category(category.id).await.unwrap();
        let service = p.get_service(service.id).await.unwrap();
        assert_eq!(service.category_id, None, "[{}]", b.name);
    }
}

#[tokio::test]
async fn service_create_rejects_unknown_category() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let result = p
            .create_service(
                salon_id,
                CreateServiceItem {
                    category_id: Some(Uuid::new_v4()),
                    name: "Trim".into(),
                    duration_minutes: 20,
                    price: 15.0,
                },
            )
            .await;
        assert_not_found(result, b.name);
    }
}

#[tokio::test]
async fn service_update_can_deactivate() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let service_id = seed_service(p, salon_id, "Trim").await;

        let updated = p
            .update_service(
                service_id,
                UpdateServiceItem {
                    price: Some(30.0),
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 30.0, "[{}]", b.name);
        assert!(!updated.active, "[{}]", b.name);
    }
}

#[tokio::test]
async fn booking_create_links_workers_and_services() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let zoe = seed_worker(p, salon_id, "Zoe").await;
        let trim = seed_service(p, salon_id, "Trim").await;

        let booking = p
            .create_booking(
                salon_id,
                CreateBooking {
                    client_id,
                    worker_ids: vec![zoe, ana],
                    service_ids: vec![trim],
                    starts_at: at(10, 9),
                    ends_at: at(10, 10),
                    status: None,
                    notes: Some("first visit".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending, "[{}]", b.name);

        let details = p.get_booking_details(booking.id).await.unwrap();
        assert_eq!(details.client.id, client_id, "[{}]", b.name);
        let worker_names: Vec<&str> =
            details.workers.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(worker_names, vec!["Ana", "Zoe"], "[{}]", b.name);
        assert_eq!(details.services.len(), 1, "[{}]", b.name);
        assert_eq!(details.services[0].id, trim, "[{}]", b.name);
    }
}

#[tokio::test]
async fn booking_create_rejects_missing_references() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let trim = seed_service(p, salon_id, "Trim").await;

        let missing_client = p
            .create_booking(
                salon_id,
                CreateBooking {
                    client_id: Uuid::new_v4(),
                    worker_ids: vec![ana],
                    service_ids: vec![trim],
                    starts_at: at(10, 9),
                    ends_at: at(10, 10),
                    status: None,
                    notes: None,
                },
            )
            .await;
        assert_not_found(missing_client, b.name);

        let missing_worker = p
            .create_booking(
                salon_id,
                CreateBooking {
                    client_id,
                    worker_ids: vec![Uuid::new_v4()],
                    service_ids: vec![trim],
                    starts_at: at(10, 9),
                    ends_at: at(10, 10),
                    status: None,
                    notes: None,
                },
            )
            .await;
        assert_not_found(missing_worker, b.name);
    }
}

#[tokio::test]
async fn bookings_list_filters_by_start_time() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let trim = seed_service(p, salon_id, "Trim").await;

        let early = seed_booking(p, salon_id, client_id, ana, trim, at(10, 9), at(10, 10)).await;
        let late = seed_booking(p, salon_id, client_id, ana, trim, at(12, 9), at(12, 10)).await;

        let all = p.list_bookings(salon_id, TimeRange::default()).await.unwrap();
        assert_eq!(
            all.iter().map(|x| x.id).collect::<Vec<_>>(),
            vec![early, late],
            "[{}]",
            b.name
        );

        let windowed = p
            .list_bookings(
                salon_id,
                TimeRange {
                    from: Some(at(11, 0)),
                    to: Some(at(13, 0)),
                },
            )
            .await
            .unwrap();
        assert_eq!(windowed.len(), 1, "[{}]", b.name);
        assert_eq!(windowed[0].id, late, "[{}]", b.name);
    }
}

#[tokio::test]
async fn conflict_scan_matches_overlapping_shared_workers_only() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let zoe = seed_worker(p, salon_id, "Zoe").await;
        let trim = seed_service(p, salon_id, "Trim").await;

        let existing =
            seed_booking(p, salon_id, client_id, ana, trim, at(10, 10), at(10, 11)).await;

        // Overlap with the same worker clashes.
        let hits = p
            .find_conflicting_bookings(salon_id, &[ana], at(10, 10), at(10, 12), None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1, "[{}]", b.name);
        assert_eq!(hits[0].id, existing, "[{}]", b.name);

        // A different worker in the same window is free.
        let hits = p
            .find_conflicting_bookings(salon_id, &[zoe], at(10, 10), at(10, 12), None)
            .await
            .unwrap();
        assert!(hits.is_empty(), "[{}]", b.name);

        // Back-to-back does not clash.
        let hits = p
            .find_conflicting_bookings(salon_id, &[ana], at(10, 11), at(10, 12), None)
            .await
            .unwrap();
        assert!(hits.is_empty(), "[{}]", b.name);

        // Excluding the booking itself frees the slot (reschedule case).
        let hits = p
            .find_conflicting_bookings(salon_id, &[ana], at(10, 10), at(10, 11), Some(existing))
            .await
            .unwrap();
        assert!(hits.is_empty(), "[{}]", b.name);
    }
}

#[tokio::test]
async fn cancelled_bookings_release_their_slot() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let trim = seed_service(p, salon_id, "Trim").await;

        let booking =
            seed_booking(p, salon_id, client_id, ana, trim, at(10, 10), at(10, 11)).await;
        p.update_booking(
            booking,
            UpdateBooking {
                status: Some(BookingStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let hits = p
            .find_conflicting_bookings(salon_id, &[ana], at(10, 10), at(10, 11), None)
            .await
            .unwrap();
        assert!(hits.is_empty(), "[{}]", b.name);
    }
}

#[tokio::test]
async fn deleting_a_salon_removes_everything_scoped_to_it() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let trim = seed_service(p, salon_id, "Trim").await;
        let booking =
            seed_booking(p, salon_id, client_id, ana, trim, at(10, 10), at(10, 11)).await;
        let income = p
            .create_income(
                salon_id,
                CreateIncome {
                    booking_id: Some(booking),
                    amount: 25.0,
                    method: None,
                    recorded_on: on(10),
                    splits: vec![],
                },
            )
            .await
            .unwrap();

        p.delete_salon(salon_id).await.unwrap();

        assert_not_found(p.get_worker(ana).await, b.name);
        assert_not_found(p.get_client(client_id).await, b.name);
        assert_not_found(p.get_service(trim).await, b.name);
        assert_not_found(p.get_booking(booking).await, b.name);
        assert_not_found(p.get_income_details(income.income.id).await, b.name);
    }
}

#[tokio::test]
async fn deleting_a_client_removes_their_bookings() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let other_client = seed_client(p, salon_id, "Mara").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let trim = seed_service(p, salon_id, "Trim").await;

        let doomed =
            seed_booking(p, salon_id, client_id, ana, trim, at(10, 10), at(10, 11)).await;
        let kept =
            seed_booking(p, salon_id, other_client, ana, trim, at(11, 10), at(11, 11)).await;

        p.delete_client(client_id).await.unwrap();
        assert_not_found(p.get_booking(doomed).await, b.name);
        assert!(p.get_booking(kept).await.is_ok(), "[{}]", b.name);
    }
}

#[tokio::test]
async fn deleting_a_booking_detaches_its_incomes() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let client_id = seed_client(p, salon_id, "Luca").await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let trim = seed_service(p, salon_id, "Trim").await;
        let booking =
            seed_booking(p, salon_id, client_id, ana, trim, at(10, 10), at(10, 11)).await;

        let income = p
            .create_income(
                salon_id,
                CreateIncome {
                    booking_id: Some(booking),
                    amount: 25.0,
                    method: None,
                    recorded_on: on(10),
                    splits: vec![],
                },
            )
            .await
            .unwrap();

        p.delete_booking(booking).await.unwrap();
        let income = p.get_income_details(income.income.id).await.unwrap();
        assert_eq!(income.income.booking_id, None, "[{}]", b.name);
    }
}

#[tokio::test]
async fn income_splits_round_trip_and_range_filter() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let ana = seed_worker(p, salon_id, "Ana").await;
        let zoe = seed_worker(p, salon_id, "Zoe").await;

        let split = p
            .create_income(
                salon_id,
                CreateIncome {
                    booking_id: None,
                    amount: 100.0,
                    method: Some(PaymentMethod::Card),
                    recorded_on: on(10),
                    splits: vec![
                        CreateIncomeSplit {
                            worker_id: ana,
                            percentage: 60.0,
                        },
                        CreateIncomeSplit {
                            worker_id: zoe,
                            percentage: 40.0,
                        },
                    ],
                },
            )
            .await
            .unwrap();
        assert_eq!(split.splits.len(), 2, "[{}]", b.name);
        assert_eq!(split.income.method, PaymentMethod::Card, "[{}]", b.name);

        p.create_income(
            salon_id,
            CreateIncome {
                booking_id: None,
                amount: 50.0,
                method: None,
                recorded_on: on(20),
                splits: vec![],
            },
        )
        .await
        .unwrap();

        // Inclusive date range keeps only the first income.
        let filtered = p
            .list_incomes(
                salon_id,
                DateRange {
                    from: Some(on(1)),
                    to: Some(on(10)),
                },
            )
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1, "[{}]", b.name);
        assert_eq!(filtered[0].income.amount, 100.0, "[{}]", b.name);

        // Newest recorded_on first.
        let all = p.list_incomes(salon_id, DateRange::default()).await.unwrap();
        assert_eq!(all[0].income.recorded_on, on(20), "[{}]", b.name);
    }
}

#[tokio::test]
async fn income_create_rejects_unknown_split_worker() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let result = p
            .create_income(
                salon_id,
                CreateIncome {
                    booking_id: None,
                    amount: 100.0,
                    method: None,
                    recorded_on: on(10),
                    splits: vec![CreateIncomeSplit {
                        worker_id: Uuid::new_v4(),
                        percentage: 100.0,
                    }],
                },
            )
            .await;
        assert_not_found(result, b.name);
    }
}

#[tokio::test]
async fn income_create_rejects_unknown_booking() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let result = p
            .create_income(
                salon_id,
                CreateIncome {
                    booking_id: Some(Uuid::new_v4()),
                    amount: 100.0,
                    method: None,
                    recorded_on: on(10),
                    splits: vec![],
                },
            )
            .await;
        assert_not_found(result, b.name);
    }
}

#[tokio::test]
async fn booking_update_resolves_the_booking_before_its_references() {
    for b in backends().await {
        let p = &b.provider;
        seed_salon(p).await;
        let result = p
            .update_booking(
                Uuid::new_v4(),
                UpdateBooking {
                    client_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;
        match result {
            Err(ProviderError::NotFound { entity, .. }) => {
                assert_eq!(entity, "booking", "[{}]", b.name);
            }
            other => panic!("[{}] expected NotFound, got {other:?}", b.name),
        }
    }
}

#[tokio::test]
async fn expenses_crud_and_category_detach() {
    for b in backends().await {
        let p = &b.provider;
        let salon_id = seed_salon(p).await;
        let category = p
            .create_expense_category(
                salon_id,
                CreateExpenseCategory {
                    name: "Supplies".into(),
                },
            )
            .await
            .unwrap();

        let expense = p
            .create_expense(
                salon_id,
                CreateExpense {
                    category_id: Some(category.id),
                    amount: 40.0,
                    description: Some("shampoo restock".into()),
                    incurred_on: on(5),
                },
            )
            .await
            .unwrap();

        let updated = p
            .update_expense(
                expense.id,
                UpdateExpense {
                    amount: Some(45.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, 45.0, "[{}]", b.name);
        assert_eq!(updated.category_id, Some(category.id), "[{}]", b.name);

        p.delete_expense_category(category.id).await.unwrap();
        let expense = p.get_expense(expense.id).await.unwrap();
        assert_eq!(expense.category_id, None, "[{}]", b.name);

        let filtered = p
            .list_expenses(
                salon_id,
                DateRange {
                    from: Some(on(6)),
                    to: None,
                },
            )
            .await
            .unwrap();
        assert!(filtered.is_empty(), "[{}]", b.name);
    }
}

#[tokio::test]
async fn local_snapshot_survives_a_restart() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("store.json");

    let salon_id = {
        let p: Arc<dyn DataProvider> =
            Arc::new(LocalDataProvider::with_snapshot(path.clone()).await.unwrap());
        let salon_id = seed_salon(&p).await;
        seed_worker(&p, salon_id, "Ana").await;
        salon_id
    };

    let reloaded: Arc<dyn DataProvider> =
        Arc::new(LocalDataProvider::with_snapshot(path).await.unwrap());
    let salon = reloaded.get_salon(salon_id).await.unwrap();
    assert_eq!(salon.name, "Shear Genius");
    assert_eq!(reloaded.list_workers(salon_id).await.unwrap().len(), 1);
}
