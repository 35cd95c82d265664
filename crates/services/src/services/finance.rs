//! Income and expense tracking: split validation and period summaries.

use std::sync::Arc;

use db::{
    models::finance::{
        CreateExpense, CreateIncome, Expense, IncomeDetails, PaymentMethod, UpdateExpense,
    },
    provider::{DataProvider, DateRange, ProviderError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

/// Split percentages may be off by at most this much from 100.
const SPLIT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("split percentages must be positive")]
    NonPositiveSplit,
    #[error("split percentages add up to {total}, expected 100")]
    SplitsDontAddUp { total: f64 },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Totals over a period, plus the per-payment-method breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub income_by_method: Vec<MethodTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub total: f64,
}

#[derive(Clone)]
pub struct FinanceService {
    provider: Arc<dyn DataProvider>,
}

impl FinanceService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// Record a payment. When splits are given they must each be positive
    /// and together account for exactly 100% (within tolerance). An empty
    /// split list is house income.
    pub async fn record_income(
        &self,
        salon_id: Uuid,
        data: CreateIncome,
    ) -> Result<IncomeDetails, FinanceError> {
        if data.amount <= 0.0 {
            return Err(FinanceError::NonPositiveAmount);
        }
        if !data.splits.is_empty() {
            if data.splits.iter().any(|s| s.percentage <= 0.0) {
                return Err(FinanceError::NonPositiveSplit);
            }
            let total: f64 = data.splits.iter().map(|s| s.percentage).sum();
            if (total - 100.0).abs() > SPLIT_TOLERANCE {
                return Err(FinanceError::SplitsDontAddUp { total });
            }
        }

        let details = self.provider.create_income(salon_id, data).await?;
        info!(income_id = %details.income.id, salon_id = %salon_id, "income recorded");
        Ok(details)
    }

    pub async fn record_expense(
        &self,
        salon_id: Uuid,
        data: CreateExpense,
    ) -> Result<Expense, FinanceError> {
        if data.amount <= 0.0 {
            return Err(FinanceError::NonPositiveAmount);
        }
        let expense = self.provider.create_expense(salon_id, data).await?;
        info!(expense_id = %expense.id, salon_id = %salon_id, "expense recorded");
        Ok(expense)
    }

    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        data: UpdateExpense,
    ) -> Result<Expense, FinanceError> {
        if matches!(data.amount, Some(amount) if amount <= 0.0) {
            return Err(FinanceError::NonPositiveAmount);
        }
        Ok(self.provider.update_expense(expense_id, data).await?)
    }

    /// Income/expense totals over the given period.
    pub async fn summary(
        &self,
        salon_id: Uuid,
        range: DateRange,
    ) -> Result<FinanceSummary, FinanceError> {
        let incomes = self.provider.list_incomes(salon_id, range).await?;
        let expenses = self.provider.list_expenses(salon_id, range).await?;

        let total_income: f64 = incomes.iter().map(|i| i.income.amount).sum();
        let total_expense: f64 = expenses.iter().map(|e| e.amount).sum();

        let mut income_by_method: Vec<MethodTotal> = Vec::new();
        for details in &incomes {
            match income_by_method
                .iter_mut()
                .find(|mt| mt.method == details.income.method)
            {
                Some(mt) => mt.total += details.income.amount,
                None => income_by_method.push(MethodTotal {
                    method: details.income.method,
                    total: details.income.amount,
                }),
            }
        }
        income_by_method.sort_by_key(|mt| mt.method.to_string());

        Ok(FinanceSummary {
            total_income,
            total_expense,
            net: total_income - total_expense,
            income_by_method,
        })
    }
}
