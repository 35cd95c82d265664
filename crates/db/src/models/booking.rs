use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{catalog::ServiceItem, client::Client, worker::Worker};

#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Cancelled and no-show bookings release their time slot.
    pub fn blocks_slot(self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::NoShow)
    }
}

/// A scheduled appointment linking a client, one or more workers and one or
/// more services. Worker and service links live in separate link rows.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub client_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Half-open interval overlap: bookings that merely touch do not clash.
    pub fn overlaps(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        self.starts_at < ends_at && starts_at < self.ends_at
    }
}

/// Link row: one worker assigned to a booking.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct BookingWorker {
    pub booking_id: Uuid,
    pub worker_id: Uuid,
}

/// Link row: one service performed in a booking.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct BookingService {
    pub booking_id: Uuid,
    pub service_id: Uuid,
}

/// Relation-expanded read shape used by the agenda and detail views.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(flatten)]
    #[ts(flatten)]
    pub booking: Booking,
    pub client: Client,
    pub workers: Vec<Worker>,
    pub services: Vec<ServiceItem>,
}

impl std::ops::Deref for BookingDetails {
    type Target = Booking;
    fn deref(&self) -> &Self::Target {
        &self.booking
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub client_id: Uuid,
    pub worker_ids: Vec<Uuid>,
    pub service_ids: Vec<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBooking {
    pub client_id: Option<Uuid>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    fn booking(start: u32, end: u32) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            salon_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            starts_at: at(start),
            ends_at: at(end),
            status: BookingStatus::Confirmed,
            notes: None,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    #[test]
    fn overlapping_windows_clash() {
        let b = booking(10, 12);
        assert!(b.overlaps(at(11), at(13)));
        assert!(b.overlaps(at(9), at(11)));
        assert!(b.overlaps(at(10), at(12)));
        assert!(b.overlaps(at(9), at(13)));
    }

    #[test]
    fn touching_windows_do_not_clash() {
        let b = booking(10, 12);
        assert!(!b.overlaps(at(12), at(13)));
        assert!(!b.overlaps(at(8), at(10)));
    }

    #[test]
    fn cancelled_and_no_show_release_the_slot() {
        assert!(BookingStatus::Pending.blocks_slot());
        assert!(BookingStatus::Confirmed.blocks_slot());
        assert!(BookingStatus::Completed.blocks_slot());
        assert!(!BookingStatus::Cancelled.blocks_slot());
        assert!(!BookingStatus::NoShow.blocks_slot());
    }
}
