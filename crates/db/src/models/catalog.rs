//! The service catalog a salon offers: categories and the priced services
//! inside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub position: i32, // manual ordering in the booking wizard
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceCategory {
    pub name: String,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceCategory {
    pub name: Option<String>,
    pub position: Option<i32>,
}

/// A bookable, priced service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceItem {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceItem {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<f64>,
    pub active: Option<bool>,
}
