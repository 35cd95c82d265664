//! The data-provider abstraction: a uniform CRUD+relations contract over the
//! whole entity catalog, with two interchangeable backends.
//!
//! - [`LocalDataProvider`] keeps everything in memory behind an `RwLock`,
//!   optionally snapshotted to a JSON file (the demo store).
//! - [`SqlDataProvider`] is the real database backend (sqlite via sqlx).
//!
//! Both backends must observe identical semantics; the conformance suite in
//! `tests/provider_tests.rs` runs every scenario against each.

mod local;
mod sql;

pub use local::LocalDataProvider;
pub use sql::SqlDataProvider;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    booking::{Booking, BookingDetails, CreateBooking, UpdateBooking},
    catalog::{
        CreateServiceCategory, CreateServiceItem, ServiceCategory, ServiceItem,
        UpdateServiceCategory, UpdateServiceItem,
    },
    client::{Client, CreateClient, UpdateClient},
    finance::{
        CreateExpense, CreateExpenseCategory, CreateIncome, Expense, ExpenseCategory,
        IncomeDetails, UpdateExpense, UpdateExpenseCategory,
    },
    salon::{CreateSalon, Salon, UpdateSalon},
    worker::{CreateWorker, UpdateWorker, Worker},
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("snapshot io error: {0}")]
    SnapshotIo(#[from] std::io::Error),
    #[error("snapshot decode error: {0}")]
    SnapshotDecode(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Optional time window for booking queries: inclusive `from`, exclusive `to`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| t >= from) && self.to.is_none_or(|to| t < to)
    }
}

/// Optional calendar-date window for finance queries, inclusive on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, d: NaiveDate) -> bool {
        self.from.is_none_or(|from| d >= from) && self.to.is_none_or(|to| d <= to)
    }
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    // Salons
    async fn list_salons(&self) -> Result<Vec<Salon>>;
    async fn get_salon(&self, id: Uuid) -> Result<Salon>;
    async fn create_salon(&self, data: CreateSalon) -> Result<Salon>;
    async fn update_salon(&self, id: Uuid, data: UpdateSalon) -> Result<Salon>;
    /// Removes the salon and every row scoped to it.
    async fn delete_salon(&self, id: Uuid) -> Result<()>;

    // Workers
    async fn list_workers(&self, salon_id: Uuid) -> Result<Vec<Worker>>;
    async fn get_worker(&self, id: Uuid) -> Result<Worker>;
    async fn create_worker(&self, salon_id: Uuid, data: CreateWorker) -> Result<Worker>;
    async fn update_worker(&self, id: Uuid, data: UpdateWorker) -> Result<Worker>;
    async fn delete_worker(&self, id: Uuid) -> Result<()>;

    // Clients
    async fn list_clients(&self, salon_id: Uuid) -> Result<Vec<Client>>;
    async fn get_client(&self, id: Uuid) -> Result<Client>;
    async fn create_client(&self, salon_id: Uuid, data: CreateClient) -> Result<Client>;
    async fn update_client(&self, id: Uuid, data: UpdateClient) -> Result<Client>;
    async fn delete_client(&self, id: Uuid) -> Result<()>;

    // Service catalog
    async fn list_service_categories(&self, salon_id: Uuid) -> Result<Vec<ServiceCategory>>;
    async fn create_service_category(
        &self,
        salon_id: Uuid,
        data: CreateServiceCategory,
    ) -> Result<ServiceCategory>;
    async fn update_service_category(
        &self,
        id: Uuid,
        data: UpdateServiceCategory,
    ) -> Result<ServiceCategory>;
    async fn delete_service_category(&self, id: Uuid) -> Result<()>;

    async fn list_services(&self, salon_id: Uuid) -> Result<Vec<ServiceItem>>;
    async fn get_service(&self, id: Uuid) -> Result<ServiceItem>;
    async fn create_service(&self, salon_id: Uuid, data: CreateServiceItem) -> Result<ServiceItem>;
    async fn update_service(&self, id: Uuid, data: UpdateServiceItem) -> Result<ServiceItem>;
    async fn delete_service(&self, id: Uuid) -> Result<()>;

    // Bookings
    async fn list_bookings(&self, salon_id: Uuid, range: TimeRange) -> Result<Vec<Booking>>;
    async fn get_booking(&self, id: Uuid) -> Result<Booking>;
    async fn get_booking_details(&self, id: Uuid) -> Result<BookingDetails>;
    async fn create_booking(&self, salon_id: Uuid, data: CreateBooking) -> Result<Booking>;
    async fn update_booking(&self, id: Uuid, data: UpdateBooking) -> Result<Booking>;
    async fn delete_booking(&self, id: Uuid) -> Result<()>;
    /// The double-booking scan: slot-blocking bookings of the salon that
    /// share at least one of `worker_ids` and overlap the half-open window.
    async fn find_conflicting_bookings(
        &self,
        salon_id: Uuid,
        worker_ids: &[Uuid],
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude_booking: Option<Uuid>,
    ) -> Result<Vec<Booking>>;

    // Incomes
    async fn list_incomes(&self, salon_id: Uuid, range: DateRange) -> Result<Vec<IncomeDetails>>;
    async fn get_income_details(&self, id: Uuid) -> Result<IncomeDetails>;
    async fn create_income(&self, salon_id: Uuid, data: CreateIncome) -> Result<IncomeDetails>;
    async fn delete_income(&self, id: Uuid) -> Result<()>;

    // Expenses
    async fn list_expense_categories(&self, salon_id: Uuid) -> Result<Vec<ExpenseCategory>>;
    async fn create_expense_category(
        &self,
        salon_id: Uuid,
        data: CreateExpenseCategory,
    ) -> Result<ExpenseCategory>;
    async fn update_expense_category(
        &self,
        id: Uuid,
        data: UpdateExpenseCategory,
    ) -> Result<ExpenseCategory>;
    async fn delete_expense_category(&self, id: Uuid) -> Result<()>;

    async fn list_expenses(&self, salon_id: Uuid, range: DateRange) -> Result<Vec<Expense>>;
    async fn get_expense(&self, id: Uuid) -> Result<Expense>;
    async fn create_expense(&self, salon_id: Uuid, data: CreateExpense) -> Result<Expense>;
    async fn update_expense(&self, id: Uuid, data: UpdateExpense) -> Result<Expense>;
    async fn delete_expense(&self, id: Uuid) -> Result<()>;
}
