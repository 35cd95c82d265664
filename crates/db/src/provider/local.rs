//! In-memory backend with an optional JSON snapshot file. This is the demo
//! store: every table is a plain `Vec`, relations are link-row vectors and
//! queries are linear scans. The whole store is (de)serialized as one JSON
//! document, which doubles as the snapshot format on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{DataProvider, DateRange, ProviderError, Result, TimeRange};
use crate::models::{
    booking::{
        Booking, BookingDetails, BookingService, BookingWorker, CreateBooking, UpdateBooking,
    },
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

#[derive(Debug, Default, Serialize, Deserialize)]
struct Store {
    salons: Vec<Salon>,
    workers: Vec<Worker>,
    clients: Vec<Client>,
    service_categories: Vec<ServiceCategory>,
    services: Vec<ServiceItem>,
    bookings: Vec<Booking>,
    booking_workers: Vec<BookingWorker>,
    booking_services: Vec<BookingService>,
    incomes: Vec<Income>,
    income_splits: Vec<IncomeSplit>,
    expense_categories: Vec<ExpenseCategory>,
    expenses: Vec<Expense>,
}

impl Store {
    fn salon(&self, id: Uuid) -> Result<&Salon> {
        self.salons
            .iter()
            .find(|s| s.id == id)
            .ok_or(ProviderError::not_found("salon", id))
    }

    fn worker(&self, id: Uuid) -> Result<&Worker> {
        self.workers
            .iter()
            .find(|w| w.id == id)
            .ok_or(ProviderError::not_found("worker", id))
    }

    fn client(&self, id: Uuid) -> Result<&Client> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or(ProviderError::not_found("client", id))
    }

    fn service(&self, id: Uuid) -> Result<&ServiceItem> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or(ProviderError::not_found("service", id))
    }

    fn booking(&self, id: Uuid) -> Result<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or(ProviderError::not_found("booking", id))
    }

    fn service_category(&self, id: Uuid) -> Result<&ServiceCategory> {
        self.service_categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(ProviderError::not_found("service category", id))
    }

    /// Drops a booking's link rows and detaches incomes that reference it.
    fn unlink_booking(&mut self, booking_id: Uuid) {
        self.booking_workers.retain(|bw| bw.booking_id != booking_id);
        self.booking_services.retain(|bs| bs.booking_id != booking_id);
        for income in self.incomes.iter_mut() {
            if income.booking_id == Some(booking_id) {
                income.booking_id = None;
            }
        }
    }

    fn remove_booking(&mut self, booking_id: Uuid) {
        self.unlink_booking(booking_id);
        self.bookings.retain(|b| b.id != booking_id);
    }

    fn income_details(&self, income: &Income) -> IncomeDetails {
        let mut splits: Vec<IncomeSplit> = self
            .income_splits
            .iter()
            .filter(|s| s.income_id == income.id)
            .cloned()
            .collect();
        splits.sort_by_key(|s| s.worker_id);
        IncomeDetails {
            income: income.clone(),
            splits,
        }
    }
}

/// In-memory provider used for demos and tests.
pub struct LocalDataProvider {
    store: RwLock<Store>,
    snapshot: Option<PathBuf>,
}

impl Default for LocalDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalDataProvider {
    /// Fresh empty store, nothing persisted.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
            snapshot: None,
        }
    }

    /// Store backed by a JSON snapshot file. If the file exists its contents
    /// are loaded; otherwise the store starts empty and the file is created
    /// on the first mutation.
    pub async fn with_snapshot(path: PathBuf) -> Result<Self> {
        let store = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Store::default(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "loaded local store snapshot");
        Ok(Self {
            store: RwLock::new(store),
            snapshot: Some(path),
        })
    }

    async fn persist(&self, store: &Store) -> Result<()> {
        if let Some(path) = &self.snapshot {
            let bytes = serde_json::to_vec_pretty(store)?;
            tokio::fs::write(path, bytes).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl DataProvider for LocalDataProvider {
    // ------------------------------------------------------------------ salons

    async fn list_salons(&self) -> Result<Vec<Salon>> {
        let store = self.store.read().await;
        let mut salons = store.salons.clone();
        salons.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(salons)
    }

    async fn get_salon(&self, id: Uuid) -> Result<Salon> {
        Ok(self.store.read().await.salon(id)?.clone())
    }

    async fn create_salon(&self, data: CreateSalon) -> Result<Salon> {
        let now = Utc::now();
        let salon = Salon {
            id: Uuid::new_v4(),
            name: data.name,
            currency: data.currency.unwrap_or_else(|| "EUR".to_string()),
            timezone: data.timezone.unwrap_or_else(|| "UTC".to_string()),
            created_at: now,
            updated_at: now,
        };
        let mut store = self.store.write().await;
        store.salons.push(salon.clone());
        self.persist(&store).await?;
        Ok(salon)
    }

    async fn update_salon(&self, id: Uuid, data: UpdateSalon) -> Result<Salon> {
        let mut store = self.store.write().await;
        let salon = store
            .salons
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ProviderError::not_found("salon", id))?;
        if data == UpdateSalon::default() {
            return Ok(salon.clone());
        }
        if let Some(name) = data.name {
            salon.name = name;
        }
        if let Some(currency) = data.currency {
            salon.currency = currency;
        }
        if let Some(timezone) = data.timezone {
            salon.timezone = timezone;
        }
        salon.updated_at = Utc::now();
        let salon = salon.clone();
        self.persist(&store).await?;
        Ok(salon)
    }

    async fn delete_salon(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        store.salon(id)?;
        let booking_ids: Vec<Uuid> = store
            .bookings
            .iter()
            .filter(|b| b.salon_id == id)
            .map(|b| b.id)
            .collect();
        for booking_id in booking_ids {
            store.remove_booking(booking_id);
        }
        let income_ids: Vec<Uuid> = store
            .incomes
            .iter()
            .filter(|i| i.salon_id == id)
            .map(|i| i.id)
            .collect();
        store
            .income_splits
            .retain(|s| !income_ids.contains(&s.income_id));
        store.incomes.retain(|i| i.salon_id != id);
        store.workers.retain(|w| w.salon_id != id);
        store.clients.retain(|c| c.salon_id != id);
        store.service_categories.retain(|c| c.salon_id != id);
        store.services.retain(|s| s.salon_id != id);
        store.expense_categories.retain(|c| c.salon_id != id);
        store.expenses.retain(|e| e.salon_id != id);
        store.salons.retain(|s| s.id != id);
        self.persist(&store).await?;
        Ok(())
    }

    // ----------------------------------------------------------------- workers

    async fn list_workers(&self, salon_id: Uuid) -> Result<Vec<Worker>> {
        let store = self.store.read().await;
        let mut workers: Vec<Worker> = store
            .workers
            .iter()
            .filter(|w| w.salon_id == salon_id)
            .cloned()
            .collect();
        workers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(workers)
    }

    async fn get_worker(&self, id: Uuid) -> Result<Worker> {
        Ok(self.store.read().await.worker(id)?.clone())
    }

    async fn create_worker(&self, salon_id: Uuid, data: CreateWorker) -> Result<Worker> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        let worker = Worker {
            id: Uuid::new_v4(),
            salon_id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            role: data.role.unwrap_or_default(),
            color: data.color,
            active: true,
            created_at: now,
            updated_at: now,
        };
        store.workers.push(worker.clone());
        self.persist(&store).await?;
        Ok(worker)
    }

    async fn update_worker(&self, id: Uuid, data: UpdateWorker) -> Result<Worker> {
        let mut store = self.store.write().await;
        let worker = store
            .workers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(ProviderError::not_found("worker", id))?;
        if data == UpdateWorker::default() {
            return Ok(worker.clone());
        }
        if let Some(name) = data.name {
            worker.name = name;
        }
        if let Some(email) = data.email {
            worker.email = Some(email);
        }
        if let Some(phone) = data.phone {
            worker.phone = Some(phone);
        }
        if let Some(role) = data.role {
            worker.role = role;
        }
        if let Some(color) = data.color {
            worker.color = Some(color);
        }
        if let Some(active) = data.active {
            worker.active = active;
        }
        worker.updated_at = Utc::now();
        let worker = worker.clone();
        self.persist(&store).await?;
        Ok(worker)
    }

    async fn delete_worker(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        store.worker(id)?;
        store.workers.retain(|w| w.id != id);
        store.booking_workers.retain(|bw| bw.worker_id != id);
        store.income_splits.retain(|s| s.worker_id != id);
        self.persist(&store).await?;
        Ok(())
    }

    // ----------------------------------------------------------------- clients

    async fn list_clients(&self, salon_id: Uuid) -> Result<Vec<Client>> {
        let store = self.store.read().await;
        let mut clients: Vec<Client> = store
            .clients
            .iter()
            .filter(|c| c.salon_id == salon_id)
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(clients)
    }

    async fn get_client(&self, id: Uuid) -> Result<Client> {
        Ok(self.store.read().await.client(id)?.clone())
    }

    async fn create_client(&self, salon_id: Uuid, data: CreateClient) -> Result<Client> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        let client = Client {
            id: Uuid::new_v4(),
            salon_id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };
        store.clients.push(client.clone());
        self.persist(&store).await?;
        Ok(client)
    }

    async fn update_client(&self, id: Uuid, data: UpdateClient) -> Result<Client> {
        let mut store = self.store.write().await;
        let client = store
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ProviderError::not_found("client", id))?;
        if data == UpdateClient::default() {
            return Ok(client.clone());
        }
        if let Some(name) = data.name {
            client.name = name;
        }
        if let Some(email) = data.email {
            client.email = Some(email);
        }
        if let Some(phone) = data.phone {
            client.phone = Some(phone);
        }
        if let Some(notes) = data.notes {
            client.notes = Some(notes);
        }
        client.updated_at = Utc::now();
        let client = client.clone();
        self.persist(&store).await?;
        Ok(client)
    }

    async fn delete_client(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        store.client(id)?;
        // Removing a client removes their bookings too, as the SQL cascade does.
        let booking_ids: Vec<Uuid> = store
            .bookings
            .iter()
            .filter(|b| b.client_id == id)
            .map(|b| b.id)
            .collect();
        for booking_id in booking_ids {
            store.remove_booking(booking_id);
        }
        store.clients.retain(|c| c.id != id);
        self.persist(&store).await?;
        Ok(())
    }

    // ----------------------------------------------------------------- catalog

    async fn list_service_categories(&self, salon_id: Uuid) -> Result<Vec<ServiceCategory>> {
        let store = self.store.read().await;
        let mut categories: Vec<ServiceCategory> = store
            .service_categories
            .iter()
            .filter(|c| c.salon_id == salon_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        Ok(categories)
    }

    async fn create_service_category(
        &self,
        salon_id: Uuid,
        data: CreateServiceCategory,
    ) -> Result<ServiceCategory> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        let category = ServiceCategory {
            id: Uuid::new_v4(),
            salon_id,
            name: data.name,
            position: data.position.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        store.service_categories.push(category.clone());
        self.persist(&store).await?;
        Ok(category)
    }

    async fn update_service_category(
        &self,
        id: Uuid,
        data: UpdateServiceCategory,
    ) -> Result<ServiceCategory> {
        let mut store = self.store.write().await;
        let category = store
            .service_categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ProviderError::not_found("service category", id))?;
        if data == UpdateServiceCategory::default() {
            return Ok(category.clone());
        }
        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(position) = data.position {
            category.position = position;
        }
        category.updated_at = Utc::now();
        let category = category.clone();
        self.persist(&store).await?;
        Ok(category)
    }

    async fn delete_service_category(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        if !store.service_categories.iter().any(|c| c.id == id) {
            return Err(ProviderError::not_found("service category", id));
        }
        store.service_categories.retain(|c| c.id != id);
        // Services keep existing, uncategorized.
        for service in store.services.iter_mut() {
            if service.category_id == Some(id) {
                service.category_id = None;
            }
        }
        self.persist(&store).await?;
        Ok(())
    }

    async fn list_services(&self, salon_id: Uuid) -> Result<Vec<ServiceItem>> {
        let store = self.store.read().await;
        let mut services: Vec<ServiceItem> = store
            .services
            .iter()
            .filter(|s| s.salon_id == salon_id)
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(services)
    }

    async fn get_service(&self, id: Uuid) -> Result<ServiceItem> {
        Ok(self.store.read().await.service(id)?.clone())
    }

    async fn create_service(&self, salon_id: Uuid, data: CreateServiceItem) -> Result<ServiceItem> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        if let Some(category_id) = data.category_id {
            store.service_category(category_id)?;
        }
        let service = ServiceItem {
            id: Uuid::new_v4(),
            salon_id,
            category_id: data.category_id,
            name: data.name,
            duration_minutes: data.duration_minutes,
            price: data.price,
            active: true,
            created_at: now,
            updated_at: now,
        };
        store.services.push(service.clone());
        self.persist(&store).await?;
        Ok(service)
    }

    async fn update_service(&self, id: Uuid, data: UpdateServiceItem) -> Result<ServiceItem> {
        let mut store = self.store.write().await;
        let service = store
            .services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ProviderError::not_found("service", id))?;
        if data == UpdateServiceItem::default() {
            return Ok(service.clone());
        }
        if let Some(category_id) = data.category_id {
            service.category_id = Some(category_id);
        }
        if let Some(name) = data.name {
            service.name = name;
        }
        if let Some(duration_minutes) = data.duration_minutes {
            service.duration_minutes = duration_minutes;
        }
        if let Some(price) = data.price {
            service.price = price;
        }
        if let Some(active) = data.active {
            service.active = active;
        }
        service.updated_at = Utc::now();
        let service = service.clone();
        self.persist(&store).await?;
        Ok(service)
    }

    async fn delete_service(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        store.service(id)?;
        store.services.retain(|s| s.id != id);
        store.booking_services.retain(|bs| bs.service_id != id);
        self.persist(&store).await?;
        Ok(())
    }

    // ---------------------------------------------------------------- bookings

    async fn list_bookings(&self, salon_id: Uuid, range: TimeRange) -> Result<Vec<Booking>> {
        let store = self.store.read().await;
        let mut bookings: Vec<Booking> = store
            .bookings
            .iter()
            .filter(|b| b.salon_id == salon_id && range.contains(b.starts_at))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Booking> {
        Ok(self.store.read().await.booking(id)?.clone())
    }

    async fn get_booking_details(&self, id: Uuid) -> Result<BookingDetails> {
        let store = self.store.read().await;
        let booking = store.booking(id)?.clone();
        let client = store.client(booking.client_id)?.clone();
        let mut workers: Vec<Worker> = store
            .booking_workers
            .iter()
            .filter(|bw| bw.booking_id == id)
            .filter_map(|bw| store.workers.iter().find(|w| w.id == bw.worker_id))
            .cloned()
            .collect();
        workers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let mut services: Vec<ServiceItem> = store
            .booking_services
            .iter()
            .filter(|bs| bs.booking_id == id)
            .filter_map(|bs| store.services.iter().find(|s| s.id == bs.service_id))
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(BookingDetails {
            booking,
            client,
            workers,
            services,
        })
    }

    async fn create_booking(&self, salon_id: Uuid, data: CreateBooking) -> Result<Booking> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        store.client(data.client_id)?;
        for worker_id in &data.worker_ids {
            store.worker(*worker_id)?;
        }
        for service_id in &data.service_ids {
            store.service(*service_id)?;
        }
        let booking = Booking {
            id: Uuid::new_v4(),
            salon_id,
            client_id: data.client_id,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            status: data.status.unwrap_or_default(),
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };
        for worker_id in &data.worker_ids {
            store.booking_workers.push(BookingWorker {
                booking_id: booking.id,
                worker_id: *worker_id,
            });
        }
        for service_id in &data.service_ids {
            store.booking_services.push(BookingService {
                booking_id: booking.id,
                service_id: *service_id,
            });
        }
        store.bookings.push(booking.clone());
        self.persist(&store).await?;
        Ok(booking)
    }

    async fn update_booking(&self, id: Uuid, data: UpdateBooking) -> Result<Booking> {
        let mut store = self.store.write().await;
        store.booking(id)?;
        if let Some(client_id) = data.client_id {
            store.client(client_id)?;
        }
        let booking = store
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ProviderError::not_found("booking", id))?;
        if data == UpdateBooking::default() {
            return Ok(booking.clone());
        }
        if let Some(client_id) = data.client_id {
            booking.client_id = client_id;
        }
        if let Some(starts_at) = data.starts_at {
            booking.starts_at = starts_at;
        }
        if let Some(ends_at) = data.ends_at {
            booking.ends_at = ends_at;
        }
        if let Some(status) = data.status {
            booking.status = status;
        }
        if let Some(notes) = data.notes {
            booking.notes = Some(notes);
        }
        booking.updated_at = Utc::now();
        let booking = booking.clone();
        self.persist(&store).await?;
        Ok(booking)
    }

    async fn delete_booking(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        store.booking(id)?;
        store.remove_booking(id);
        self.persist(&store).await?;
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
        let store = self.store.read().await;
        let mut conflicts: Vec<Booking> = store
            .bookings
            .iter()
            .filter(|b| {
                b.salon_id == salon_id
                    && Some(b.id) != exclude_booking
                    && b.status.blocks_slot()
                    && b.overlaps(starts_at, ends_at)
                    && store
                        .booking_workers
                        .iter()
                        .any(|bw| bw.booking_id == b.id && worker_ids.contains(&bw.worker_id))
            })
            .cloned()
            .collect();
        conflicts.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
        Ok(conflicts)
    }

    // ----------------------------------------------------------------- incomes

    async fn list_incomes(&self, salon_id: Uuid, range: DateRange) -> Result<Vec<IncomeDetails>> {
        let store = self.store.read().await;
        let mut incomes: Vec<&Income> = store
            .incomes
            .iter()
            .filter(|i| i.salon_id == salon_id && range.contains(i.recorded_on))
            .collect();
        incomes.sort_by(|a, b| b.recorded_on.cmp(&a.recorded_on).then(a.id.cmp(&b.id)));
        Ok(incomes
            .into_iter()
            .map(|i| store.income_details(i))
            .collect())
    }

    async fn get_income_details(&self, id: Uuid) -> Result<IncomeDetails> {
        let store = self.store.read().await;
        let income = store
            .incomes
            .iter()
            .find(|i| i.id == id)
            .ok_or(ProviderError::not_found("income", id))?;
        Ok(store.income_details(income))
    }

    async fn create_income(&self, salon_id: Uuid, data: CreateIncome) -> Result<IncomeDetails> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        if let Some(booking_id) = data.booking_id {
            store.booking(booking_id)?;
        }
        for split in &data.splits {
            store.worker(split.worker_id)?;
        }
        let income = Income {
            id: Uuid::new_v4(),
            salon_id,
            booking_id: data.booking_id,
            amount: data.amount,
            method: data.method.unwrap_or_default(),
            recorded_on: data.recorded_on,
            created_at: now,
        };
        for split in &data.splits {
            store.income_splits.push(IncomeSplit {
                income_id: income.id,
                worker_id: split.worker_id,
                percentage: split.percentage,
            });
        }
        store.incomes.push(income.clone());
        let details = store.income_details(&income);
        self.persist(&store).await?;
        Ok(details)
    }

    async fn delete_income(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        if !store.incomes.iter().any(|i| i.id == id) {
            return Err(ProviderError::not_found("income", id));
        }
        store.income_splits.retain(|s| s.income_id != id);
        store.incomes.retain(|i| i.id != id);
        self.persist(&store).await?;
        Ok(())
    }

    // ---------------------------------------------------------------- expenses

    async fn list_expense_categories(&self, salon_id: Uuid) -> Result<Vec<ExpenseCategory>> {
        let store = self.store.read().await;
        let mut categories: Vec<ExpenseCategory> = store
            .expense_categories
            .iter()
            .filter(|c| c.salon_id == salon_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn create_expense_category(
        &self,
        salon_id: Uuid,
        data: CreateExpenseCategory,
    ) -> Result<ExpenseCategory> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        let category = ExpenseCategory {
            id: Uuid::new_v4(),
            salon_id,
            name: data.name,
            created_at: now,
            updated_at: now,
        };
        store.expense_categories.push(category.clone());
        self.persist(&store).await?;
        Ok(category)
    }

    async fn update_expense_category(
        &self,
        id: Uuid,
        data: UpdateExpenseCategory,
    ) -> Result<ExpenseCategory> {
        let mut store = self.store.write().await;
        let category = store
            .expense_categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ProviderError::not_found("expense category", id))?;
        if data == UpdateExpenseCategory::default() {
            return Ok(category.clone());
        }
        if let Some(name) = data.name {
            category.name = name;
        }
        category.updated_at = Utc::now();
        let category = category.clone();
        self.persist(&store).await?;
        Ok(category)
    }

    async fn delete_expense_category(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        if !store.expense_categories.iter().any(|c| c.id == id) {
            return Err(ProviderError::not_found("expense category", id));
        }
        store.expense_categories.retain(|c| c.id != id);
        for expense in store.expenses.iter_mut() {
            if expense.category_id == Some(id) {
                expense.category_id = None;
            }
        }
        self.persist(&store).await?;
        Ok(())
    }

    async fn list_expenses(&self, salon_id: Uuid, range: DateRange) -> Result<Vec<Expense>> {
        let store = self.store.read().await;
        let mut expenses: Vec<Expense> = store
            .expenses
            .iter()
            .filter(|e| e.salon_id == salon_id && range.contains(e.incurred_on))
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.incurred_on.cmp(&a.incurred_on).then(a.id.cmp(&b.id)));
        Ok(expenses)
    }

    async fn get_expense(&self, id: Uuid) -> Result<Expense> {
        let store = self.store.read().await;
        store
            .expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ProviderError::not_found("expense", id))
    }

    async fn create_expense(&self, salon_id: Uuid, data: CreateExpense) -> Result<Expense> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        store.salon(salon_id)?;
        let expense = Expense {
            id: Uuid::new_v4(),
            salon_id,
            category_id: data.category_id,
            amount: data.amount,
            description: data.description,
            incurred_on: data.incurred_on,
            created_at: now,
        };
        store.expenses.push(expense.clone());
        self.persist(&store).await?;
        Ok(expense)
    }

    async fn update_expense(&self, id: Uuid, data: UpdateExpense) -> Result<Expense> {
        let mut store = self.store.write().await;
        let expense = store
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ProviderError::not_found("expense", id))?;
        if let Some(category_id) = data.category_id {
            expense.category_id = Some(category_id);
        }
        if let Some(amount) = data.amount {
            expense.amount = amount;
        }
        if let Some(description) = data.description {
            expense.description = Some(description);
        }
        if let Some(incurred_on) = data.incurred_on {
            expense.incurred_on = incurred_on;
        }
        let expense = expense.clone();
        self.persist(&store).await?;
        Ok(expense)
    }

    async fn delete_expense(&self, id: Uuid) -> Result<()> {
        let mut store = self.store.write().await;
        if !store.expenses.iter().any(|e| e.id == id) {
            return Err(ProviderError::not_found("expense", id));
        }
        store.expenses.retain(|e| e.id != id);
        self.persist(&store).await?;
        Ok(())
    }
}
