//! Appointment scheduling: window validation, the double-booking check and
//! status transitions.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use db::{
    models::booking::{Booking, BookingDetails, BookingStatus, CreateBooking, UpdateBooking},
    provider::{DataProvider, ProviderError, TimeRange},
};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("booking must end after it starts")]
    InvalidWindow,
    #[error("booking needs at least one worker")]
    NoWorkers,
    #[error("time slot already taken by {} booking(s)", conflicting.len())]
    Conflict { conflicting: Vec<Uuid> },
    #[error("cannot move a {from} booking to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Clone)]
pub struct BookingService {
    provider: Arc<dyn DataProvider>,
}

impl BookingService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Create a new appointment. Rejects an empty worker list, an inverted
    /// time window and any overlap with a slot-blocking booking of one of
    /// the requested workers.
    pub async fn schedule(
        &self,
        salon_id: Uuid,
        data: CreateBooking,
    ) -> Result<Booking, BookingError> {
        if data.ends_at <= data.starts_at {
            return Err(BookingError::InvalidWindow);
        }
        if data.worker_ids.is_empty() {
            return Err(BookingError::NoWorkers);
        }

        let conflicting = self
            .provider
            .find_conflicting_bookings(salon_id, &data.worker_ids, data.starts_at, data.ends_at, None)
            .await?;
        if !conflicting.is_empty() {
            debug!(
                salon_id = %salon_id,
                conflicts = conflicting.len(),
                "rejected double booking"
            );
            return Err(BookingError::Conflict {
                conflicting: conflicting.into_iter().map(|b| b.id).collect(),
            });
        }

        let booking = self.provider.create_booking(salon_id, data).await?;
        info!(booking_id = %booking.id, salon_id = %salon_id, "booking scheduled");
        Ok(booking)
    }

    /// Update a booking. Any change to the time window goes through the
    /// same validation and conflict scan as scheduling, with the booking
    /// itself excluded.
    pub async fn update(
        &self,
        booking_id: Uuid,
        data: UpdateBooking,
    ) -> Result<Booking, BookingError> {
        if data.starts_at.is_some() || data.ends_at.is_some() {
            let details = self.provider.get_booking_details(booking_id).await?;
            let starts_at = data.starts_at.unwrap_or(details.booking.starts_at);
            let ends_at = data.ends_at.unwrap_or(details.booking.ends_at);
            if ends_at <= starts_at {
                return Err(BookingError::InvalidWindow);
            }

            let worker_ids: Vec<Uuid> = details.workers.iter().map(|w| w.id).collect();
            let conflicting = self
                .provider
                .find_conflicting_bookings(
                    details.booking.salon_id,
                    &worker_ids,
                    starts_at,
                    ends_at,
                    Some(booking_id),
                )
                .await?;
            if !conflicting.is_empty() {
                return Err(BookingError::Conflict {
                    conflicting: conflicting.into_iter().map(|b| b.id).collect(),
                });
            }
        }

        Ok(self.provider.update_booking(booking_id, data).await?)
    }

    /// Move an existing booking to a new window, keeping its workers.
    pub async fn reschedule(
        &self,
        booking_id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .update(
                booking_id,
                UpdateBooking {
                    starts_at: Some(starts_at),
                    ends_at: Some(ends_at),
                    ..Default::default()
                },
            )
            .await?;
        info!(booking_id = %booking_id, "booking rescheduled");
        Ok(booking)
    }

    /// Transition a booking's status. Cancelled and no-show bookings cannot
    /// be completed.
    pub async fn set_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let current = self.provider.get_booking(booking_id).await?;
        if status == BookingStatus::Completed && !current.status.blocks_slot() {
            return Err(BookingError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }
        let booking = self
            .provider
            .update_booking(
                booking_id,
                UpdateBooking {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await?;
        info!(booking_id = %booking_id, status = %status, "booking status changed");
        Ok(booking)
    }

    pub async fn complete(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        self.set_status(booking_id, BookingStatus::Completed).await
    }

    pub async fn cancel(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        self.set_status(booking_id, BookingStatus::Cancelled).await
    }

    pub async fn mark_no_show(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        self.set_status(booking_id, BookingStatus::NoShow).await
    }

    /// Day view: relation-expanded bookings of one calendar day (UTC),
    /// ordered by start time.
    pub async fn agenda(
        &self,
        salon_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<BookingDetails>, BookingError> {
        let from = date.and_hms_opt(0, 0, 0).map(|t| t.and_utc());
        let to = date
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc());
        let bookings = self
            .provider
            .list_bookings(salon_id, TimeRange { from, to })
            .await?;

        let mut details = Vec::with_capacity(bookings.len());
        for booking in bookings {
            details.push(self.provider.get_booking_details(booking.id).await?);
        }
        Ok(details)
    }
}
