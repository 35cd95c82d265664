//! Database backend over sqlx/sqlite. Same contract as the local store,
//! expressed as SQL. Uses the runtime query API so the crate builds without
//! a live database; schema lives in `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{DataProvider, DateRange, ProviderError, Result, TimeRange};
use crate::models::{
    booking::{Booking, BookingDetails, CreateBooking, UpdateBooking},
    catalog::{
        CreateServiceCategory, CreateServiceItem, ServiceCategory, ServiceItem,
        UpdateServiceCategory, UpdateServiceItem,
    },
    client::{Client, CreateClient, UpdateClient},
    finance::{
        CreateExpense, CreateExpenseCategory, CreateIncome, Expense, ExpenseCategory, Income,
        IncomeDetails, IncomeSplit, UpdateExpense, UpdateExpenseCategory,
    },
    salon::{CreateSalon, Salon, UpdateSalon},
    worker::{CreateWorker, UpdateWorker, Worker},
};

const SALON_COLS: &str = "id, name, currency, timezone, created_at, updated_at";
const WORKER_COLS: &str = "id, salon_id, name, email, phone, role, color, active, created_at, updated_at";
const CLIENT_COLS: &str = "id, salon_id, name, email, phone, notes, created_at, updated_at";
const CATEGORY_COLS: &str = "id, salon_id, name, position, created_at, updated_at";
const SERVICE_COLS: &str =
    "id, salon_id, category_id, name, duration_minutes, price, active, created_at, updated_at";
const BOOKING_COLS: &str =
    "id, salon_id, client_id, starts_at, ends_at, status, notes, created_at, updated_at";
const INCOME_COLS: &str = "id, salon_id, booking_id, amount, method, recorded_on, created_at";
const EXPENSE_CATEGORY_COLS: &str = "id, salon_id, name, created_at, updated_at";
const EXPENSE_COLS: &str = "id, salon_id, category_id, amount, description, incurred_on, created_at";

/// The relational backend.
#[derive(Clone)]
pub struct SqlDataProvider {
    pool: SqlitePool,
}

impl SqlDataProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn income_splits(&self, income_id: Uuid) -> Result<Vec<IncomeSplit>> {
        let splits = sqlx::query_as::<_, IncomeSplit>(
            "SELECT income_id, worker_id, percentage
             FROM income_splits WHERE income_id = $1 ORDER BY worker_id",
        )
        .bind(income_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(splits)
    }
}

#[async_trait]
impl DataProvider for SqlDataProvider {
    // ------------------------------------------------------------------ salons

    async fn list_salons(&self) -> Result<Vec<Salon>> {
        let salons =
            sqlx::query_as::<_, Salon>(&format!("SELECT {SALON_COLS} FROM salons ORDER BY name, id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(salons)
    }

    async fn get_salon(&self, id: Uuid) -> Result<Salon> {
        sqlx::query_as::<_, Salon>(&format!("SELECT {SALON_COLS} FROM salons WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProviderError::not_found("salon", id))
    }

    async fn create_salon(&self, data: CreateSalon) -> Result<Salon> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let salon = sqlx::query_as::<_, Salon>(&format!(
            "INSERT INTO salons ({SALON_COLS}) VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {SALON_COLS}"
        ))
        .bind(id)
        .bind(data.name)
        .bind(data.currency.unwrap_or_else(|| "EUR".to_string()))
        .bind(data.timezone.unwrap_or_else(|| "UTC".to_string()))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(salon)
    }

    async fn update_salon(&self, id: Uuid, data: UpdateSalon) -> Result<Salon> {
        let current = self.get_salon(id).await?;
        if data == UpdateSalon::default() {
            return Ok(current);
        }
        let salon = sqlx::query_as::<_, Salon>(&format!(
            "UPDATE salons SET name = $2, currency = $3, timezone = $4, updated_at = $5
             WHERE id = $1 RETURNING {SALON_COLS}"
        ))
        .bind(id)
        .bind(data.name.unwrap_or(current.name))
        .bind(data.currency.unwrap_or(current.currency))
        .bind(data.timezone.unwrap_or(current.timezone))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(salon)
    }

    async fn delete_salon(&self, id: Uuid) -> Result<()> {
        // Child rows go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM salons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("salon", id));
        }
        Ok(())
    }

    // ----------------------------------------------------------------- workers

    async fn list_workers(&self, salon_id: Uuid) -> Result<Vec<Worker>> {
        let workers = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {WORKER_COLS} FROM workers WHERE salon_id = $1 ORDER BY name, id"
        ))
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(workers)
    }

    async fn get_worker(&self, id: Uuid) -> Result<Worker> {
        sqlx::query_as::<_, Worker>(&format!("SELECT {WORKER_COLS} FROM workers WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProviderError::not_found("worker", id))
    }

    async fn create_worker(&self, salon_id: Uuid, data: CreateWorker) -> Result<Worker> {
        self.get_salon(salon_id).await?;
        let now = Utc::now();
        let worker = sqlx::query_as::<_, Worker>(&format!(
            "INSERT INTO workers ({WORKER_COLS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, 1, $8, $9)
             RETURNING {WORKER_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.role.unwrap_or_default())
        .bind(data.color)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(worker)
    }

    async fn update_worker(&self, id: Uuid, data: UpdateWorker) -> Result<Worker> {
        let current = self.get_worker(id).await?;
        if data == UpdateWorker::default() {
            return Ok(current);
        }
        let worker = sqlx::query_as::<_, Worker>(&format!(
            "UPDATE workers
             SET name = $2, email = $3, phone = $4, role = $5, color = $6, active = $7,
                 updated_at = $8
             WHERE id = $1 RETURNING {WORKER_COLS}"
        ))
        .bind(id)
        .bind(data.name.unwrap_or(current.name))
        .bind(data.email.or(current.email))
        .bind(data.phone.or(current.phone))
        .bind(data.role.unwrap_or(current.role))
        .bind(data.color.or(current.color))
        .bind(data.active.unwrap_or(current.active))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(worker)
    }

    async fn delete_worker(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("worker", id));
        }
        Ok(())
    }

    // ----------------------------------------------------------------- clients

    async fn list_clients(&self, salon_id: Uuid) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLS} FROM clients WHERE salon_id = $1 ORDER BY name, id"
        ))
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    async fn get_client(&self, id: Uuid) -> Result<Client> {
        sqlx::query_as::<_, Client>(&format!("SELECT {CLIENT_COLS} FROM clients WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProviderError::not_found("client", id))
    }

    async fn create_client(&self, salon_id: Uuid, data: CreateClient) -> Result<Client> {
        self.get_salon(salon_id).await?;
        let now = Utc::now();
        let client = sqlx::query_as::<_, Client>(&format!(
            "INSERT INTO clients ({CLIENT_COLS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {CLIENT_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(client)
    }

    async fn update_client(&self, id: Uuid, data: UpdateClient) -> Result<Client> {
        let current = self.get_client(id).await?;
        if data == UpdateClient::default() {
            return Ok(current);
        }
        let client = sqlx::query_as::<_, Client>(&format!(
            "UPDATE clients
             SET name = $2, email = $3, phone = $4, notes = $5, updated_at = $6
             WHERE id = $1 RETURNING {CLIENT_COLS}"
        ))
        .bind(id)
        .bind(data.name.unwrap_or(current.name))
        .bind(data.email.or(current.email))
        .bind(data.phone.or(current.phone))
        .bind(data.notes.or(current.notes))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(client)
    }

    async fn delete_client(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("client", id));
        }
        Ok(())
    }

    // ----------------------------------------------------------------- catalog

    async fn list_service_categories(&self, salon_id: Uuid) -> Result<Vec<ServiceCategory>> {
        let categories = sqlx::query_as::<_, ServiceCategory>(&format!(
            "SELECT {CATEGORY_COLS} FROM service_categories
             WHERE salon_id = $1 ORDER BY position, name, id"
        ))
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn create_service_category(
        &self,
        salon_id: Uuid,
        data: CreateServiceCategory,
    ) -> Result<ServiceCategory> {
        self.get_salon(salon_id).await?;
        let now = Utc::now();
        let category = sqlx::query_as::<_, ServiceCategory>(&format!(
            "INSERT INTO service_categories ({CATEGORY_COLS})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CATEGORY_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.name)
        .bind(data.position.unwrap_or(0))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn update_service_category(
        &self,
        id: Uuid,
        data: UpdateServiceCategory,
    ) -> Result<ServiceCategory> {
        let current = sqlx::query_as::<_, ServiceCategory>(&format!(
            "SELECT {CATEGORY_COLS} FROM service_categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ProviderError::not_found("service category", id))?;
        if data == UpdateServiceCategory::default() {
            return Ok(current);
        }

        let category = sqlx::query_as::<_, ServiceCategory>(&format!(
            "UPDATE service_categories SET name = $2, position = $3, updated_at = $4
             WHERE id = $1 RETURNING {CATEGORY_COLS}"
        ))
        .bind(id)
        .bind(data.name.unwrap_or(current.name))
        .bind(data.position.unwrap_or(current.position))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn delete_service_category(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM service_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("service category", id));
        }
        Ok(())
    }

    async fn list_services(&self, salon_id: Uuid) -> Result<Vec<ServiceItem>> {
        let services = sqlx::query_as::<_, ServiceItem>(&format!(
            "SELECT {SERVICE_COLS} FROM services WHERE salon_id = $1 ORDER BY name, id"
        ))
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    async fn get_service(&self, id: Uuid) -> Result<ServiceItem> {
        sqlx::query_as::<_, ServiceItem>(&format!(
            "SELECT {SERVICE_COLS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ProviderError::not_found("service", id))
    }

    async fn create_service(&self, salon_id: Uuid, data: CreateServiceItem) -> Result<ServiceItem> {
        self.get_salon(salon_id).await?;
        if let Some(category_id) = data.category_id {
            let exists = sqlx::query("SELECT 1 FROM service_categories WHERE id = $1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_none() {
                return Err(ProviderError::not_found("service category", category_id));
            }
        }
        let now = Utc::now();
        let service = sqlx::query_as::<_, ServiceItem>(&format!(
            "INSERT INTO services ({SERVICE_COLS})
             VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $8)
             RETURNING {SERVICE_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.category_id)
        .bind(data.name)
        .bind(data.duration_minutes)
        .bind(data.price)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(service)
    }

    async fn update_service(&self, id: Uuid, data: UpdateServiceItem) -> Result<ServiceItem> {
        let current = self.get_service(id).await?;
        if data == UpdateServiceItem::default() {
            return Ok(current);
        }
        let service = sqlx::query_as::<_, ServiceItem>(&format!(
            "UPDATE services
             SET category_id = $2, name = $3, duration_minutes = $4, price = $5, active = $6,
                 updated_at = $7
             WHERE id = $1 RETURNING {SERVICE_COLS}"
        ))
        .bind(id)
        .bind(data.category_id.or(current.category_id))
        .bind(data.name.unwrap_or(current.name))
        .bind(data.duration_minutes.unwrap_or(current.duration_minutes))
        .bind(data.price.unwrap_or(current.price))
        .bind(data.active.unwrap_or(current.active))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(service)
    }

    async fn delete_service(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("service", id));
        }
        Ok(())
    }

    // ---------------------------------------------------------------- bookings

    async fn list_bookings(&self, salon_id: Uuid, range: TimeRange) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLS} FROM bookings
             WHERE salon_id = $1
               AND ($2 IS NULL OR starts_at >= $2)
               AND ($3 IS NULL OR starts_at < $3)
             ORDER BY starts_at, id"
        ))
        .bind(salon_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Booking> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {BOOKING_COLS} FROM bookings WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProviderError::not_found("booking", id))
    }

    async fn get_booking_details(&self, id: Uuid) -> Result<BookingDetails> {
        let booking = self.get_booking(id).await?;
        let client = self.get_client(booking.client_id).await?;
        let workers = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {WORKER_COLS} FROM workers w
             JOIN booking_workers bw ON bw.worker_id = w.id
             WHERE bw.booking_id = $1 ORDER BY w.name, w.id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let services = sqlx::query_as::<_, ServiceItem>(&format!(
            "SELECT {SERVICE_COLS} FROM services s
             JOIN booking_services bs ON bs.service_id = s.id
             WHERE bs.booking_id = $1 ORDER BY s.name, s.id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(BookingDetails {
            booking,
            client,
            workers,
            services,
        })
    }

    async fn create_booking(&self, salon_id: Uuid, data: CreateBooking) -> Result<Booking> {
        self.get_salon(salon_id).await?;
        self.get_client(data.client_id).await?;
        for worker_id in &data.worker_ids {
            self.get_worker(*worker_id).await?;
        }
        for service_id in &data.service_ids {
            self.get_service(*service_id).await?;
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings ({BOOKING_COLS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {BOOKING_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.client_id)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.status.unwrap_or_default())
        .bind(data.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for worker_id in &data.worker_ids {
            sqlx::query("INSERT INTO booking_workers (booking_id, worker_id) VALUES ($1, $2)")
                .bind(booking.id)
                .bind(worker_id)
                .execute(&mut *tx)
                .await?;
        }
        for service_id in &data.service_ids {
            sqlx::query("INSERT INTO booking_services (booking_id, service_id) VALUES ($1, $2)")
                .bind(booking.id)
                .bind(service_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(booking)
    }

    async fn update_booking(&self, id: Uuid, data: UpdateBooking) -> Result<Booking> {
        let current = self.get_booking(id).await?;
        if let Some(client_id) = data.client_id {
            self.get_client(client_id).await?;
        }
        if data == UpdateBooking::default() {
            return Ok(current);
        }
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings
             SET client_id = $2, starts_at = $3, ends_at = $4, status = $5, notes = $6,
                 updated_at = $7
             WHERE id = $1 RETURNING {BOOKING_COLS}"
        ))
        .bind(id)
        .bind(data.client_id.unwrap_or(current.client_id))
        .bind(data.starts_at.unwrap_or(current.starts_at))
        .bind(data.ends_at.unwrap_or(current.ends_at))
        .bind(data.status.unwrap_or(current.status))
        .bind(data.notes.or(current.notes))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(booking)
    }

    async fn delete_booking(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("booking", id));
        }
        Ok(())
    }

    async fn find_conflicting_bookings(
        &self,
        salon_id: Uuid,
        worker_ids: &[Uuid],
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude_booking: Option<Uuid>,
    ) -> Result<Vec<Booking>> {
        if worker_ids.is_empty() {
            return Ok(Vec::new());
        }
        // IN list is built from placeholders, ids are bound.
        let placeholders = (0..worker_ids.len())
            .map(|i| format!("${}", i + 5))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT DISTINCT b.id, b.salon_id, b.client_id, b.starts_at, b.ends_at, b.status,
                    b.notes, b.created_at, b.updated_at
             FROM bookings b
             JOIN booking_workers bw ON bw.booking_id = b.id
             WHERE b.salon_id = $1
               AND b.status NOT IN ('cancelled', 'no_show')
               AND b.starts_at < $2
               AND $3 < b.ends_at
               AND ($4 IS NULL OR b.id != $4)
               AND bw.worker_id IN ({placeholders})
             ORDER BY b.starts_at, b.id"
        );
        let mut query = sqlx::query_as::<_, Booking>(&sql)
            .bind(salon_id)
            .bind(ends_at)
            .bind(starts_at)
            .bind(exclude_booking);
        for worker_id in worker_ids {
            query = query.bind(worker_id);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    // ----------------------------------------------------------------- incomes

    async fn list_incomes(&self, salon_id: Uuid, range: DateRange) -> Result<Vec<IncomeDetails>> {
        let incomes = sqlx::query_as::<_, Income>(&format!(
            "SELECT {INCOME_COLS} FROM incomes
             WHERE salon_id = $1
               AND ($2 IS NULL OR recorded_on >= $2)
               AND ($3 IS NULL OR recorded_on <= $3)
             ORDER BY recorded_on DESC, id"
        ))
        .bind(salon_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(incomes.len());
        for income in incomes {
            let splits = self.income_splits(income.id).await?;
            details.push(IncomeDetails { income, splits });
        }
        Ok(details)
    }

    async fn get_income_details(&self, id: Uuid) -> Result<IncomeDetails> {
        let income =
            sqlx::query_as::<_, Income>(&format!("SELECT {INCOME_COLS} FROM incomes WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(ProviderError::not_found("income", id))?;
        let splits = self.income_splits(id).await?;
        Ok(IncomeDetails { income, splits })
    }

    async fn create_income(&self, salon_id: Uuid, data: CreateIncome) -> Result<IncomeDetails> {
        self.get_salon(salon_id).await?;
        if let Some(booking_id) = data.booking_id {
            self.get_booking(booking_id).await?;
        }
        for split in &data.splits {
            self.get_worker(split.worker_id).await?;
        }

        let mut tx = self.pool.begin().await?;
        let income = sqlx::query_as::<_, Income>(&format!(
            "INSERT INTO incomes ({INCOME_COLS})
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {INCOME_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.booking_id)
        .bind(data.amount)
        .bind(data.method.unwrap_or_default())
        .bind(data.recorded_on)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for split in &data.splits {
            sqlx::query(
                "INSERT INTO income_splits (income_id, worker_id, percentage) VALUES ($1, $2, $3)",
            )
            .bind(income.id)
            .bind(split.worker_id)
            .bind(split.percentage)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        let splits = self.income_splits(income.id).await?;
        Ok(IncomeDetails { income, splits })
    }

    async fn delete_income(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM incomes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("income", id));
        }
        Ok(())
    }

    // ---------------------------------------------------------------- expenses

    async fn list_expense_categories(&self, salon_id: Uuid) -> Result<Vec<ExpenseCategory>> {
        let categories = sqlx::query_as::<_, ExpenseCategory>(&format!(
            "SELECT {EXPENSE_CATEGORY_COLS} FROM expense_categories
             WHERE salon_id = $1 ORDER BY name, id"
        ))
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn create_expense_category(
        &self,
        salon_id: Uuid,
        data: CreateExpenseCategory,
    ) -> Result<ExpenseCategory> {
        self.get_salon(salon_id).await?;
        let now = Utc::now();
        let category = sqlx::query_as::<_, ExpenseCategory>(&format!(
            "INSERT INTO expense_categories ({EXPENSE_CATEGORY_COLS})
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EXPENSE_CATEGORY_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn update_expense_category(
        &self,
        id: Uuid,
        data: UpdateExpenseCategory,
    ) -> Result<ExpenseCategory> {
        let current = sqlx::query_as::<_, ExpenseCategory>(&format!(
            "SELECT {EXPENSE_CATEGORY_COLS} FROM expense_categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ProviderError::not_found("expense category", id))?;
        if data == UpdateExpenseCategory::default() {
            return Ok(current);
        }

        let category = sqlx::query_as::<_, ExpenseCategory>(&format!(
            "UPDATE expense_categories SET name = $2, updated_at = $3
             WHERE id = $1 RETURNING {EXPENSE_CATEGORY_COLS}"
        ))
        .bind(id)
        .bind(data.name.unwrap_or(current.name))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn delete_expense_category(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM expense_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("expense category", id));
        }
        Ok(())
    }

    async fn list_expenses(&self, salon_id: Uuid, range: DateRange) -> Result<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLS} FROM expenses
             WHERE salon_id = $1
               AND ($2 IS NULL OR incurred_on >= $2)
               AND ($3 IS NULL OR incurred_on <= $3)
             ORDER BY incurred_on DESC, id"
        ))
        .bind(salon_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    async fn get_expense(&self, id: Uuid) -> Result<Expense> {
        sqlx::query_as::<_, Expense>(&format!("SELECT {EXPENSE_COLS} FROM expenses WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ProviderError::not_found("expense", id))
    }

    async fn create_expense(&self, salon_id: Uuid, data: CreateExpense) -> Result<Expense> {
        self.get_salon(salon_id).await?;
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "INSERT INTO expenses ({EXPENSE_COLS})
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {EXPENSE_COLS}"
        ))
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(data.category_id)
        .bind(data.amount)
        .bind(data.description)
        .bind(data.incurred_on)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    async fn update_expense(&self, id: Uuid, data: UpdateExpense) -> Result<Expense> {
        let current = self.get_expense(id).await?;
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "UPDATE expenses
             SET category_id = $2, amount = $3, description = $4, incurred_on = $5
             WHERE id = $1 RETURNING {EXPENSE_COLS}"
        ))
        .bind(id)
        .bind(data.category_id.or(current.category_id))
        .bind(data.amount.unwrap_or(current.amount))
        .bind(data.description.or(current.description))
        .bind(data.incurred_on.unwrap_or(current.incurred_on))
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    async fn delete_expense(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProviderError::not_found("expense", id));
        }
        Ok(())
    }
}
