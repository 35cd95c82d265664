//! Income and expense records. An income may reference the booking it was
//! collected for and is divided among workers by percentage split rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub booking_id: Option<Uuid>,
    pub amount: f64,
    pub method: PaymentMethod,
    pub recorded_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// One worker's percentage share of an income.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSplit {
    pub income_id: Uuid,
    pub worker_id: Uuid,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDetails {
    #[serde(flatten)]
    #[ts(flatten)]
    pub income: Income,
    pub splits: Vec<IncomeSplit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncomeSplit {
    pub worker_id: Uuid,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncome {
    pub booking_id: Option<Uuid>,
    pub amount: f64,
    pub method: Option<PaymentMethod>,
    pub recorded_on: NaiveDate,
    #[serde(default)]
    pub splits: Vec<CreateIncomeSplit>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseCategory {
    pub name: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub category_id: Option<Uuid>,
    pub amount: f64,
    pub description: Option<String>,
    pub incurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpense {
    pub category_id: Option<Uuid>,
    pub amount: f64,
    pub description: Option<String>,
    pub incurred_on: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpense {
    pub category_id: Option<Uuid>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub incurred_on: Option<NaiveDate>,
}
