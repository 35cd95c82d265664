use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use uuid::Uuid;

/// A tenant (business) in the multi-tenant model. Every other entity is
/// scoped to a salon through its `salon_id`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Salon {
    pub id: Uuid,
    pub name: String,
    pub currency: String, // ISO 4217 code, e.g. "EUR"
    pub timezone: String, // IANA name, e.g. "Europe/Berlin"
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalon {
    pub name: String,
    pub currency: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalon {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
}
