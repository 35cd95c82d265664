//! Dashboard and team-performance aggregates. Everything here is a linear
//! fold over provider reads, matching the scale of the data (one salon,
//! hundreds of rows).

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use db::{
    models::{booking::BookingStatus, worker::Worker},
    provider::{DataProvider, DateRange, ProviderError, TimeRange},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today_bookings: u32,
    pub upcoming_bookings: u32,
    pub month_income: f64,
    pub month_expense: f64,
    pub month_net: f64,
    pub client_count: u32,
    pub active_worker_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberStats {
    pub worker: Worker,
    pub completed_bookings: u32,
    pub revenue_share: f64,
}

#[derive(Clone)]
pub struct StatsService {
    provider: Arc<dyn DataProvider>,
}

impl StatsService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    /// The landing-page numbers, relative to the given calendar day (UTC).
    pub async fn dashboard(
        &self,
        salon_id: Uuid,
        today: NaiveDate,
    ) -> Result<DashboardSummary, StatsError> {
        let day_start = today.and_hms_opt(0, 0, 0).map(|t| t.and_utc());
        let day_end = today
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc());

        let today_bookings = self
            .provider
            .list_bookings(
                salon_id,
                TimeRange {
                    from: day_start,
                    to: day_end,
                },
            )
            .await?
            .into_iter()
            .filter(|b| b.status.blocks_slot())
            .count() as u32;

        let upcoming_bookings = self
            .provider
            .list_bookings(
                salon_id,
                TimeRange {
                    from: day_end,
                    to: None,
                },
            )
            .await?
            .into_iter()
            .filter(|b| b.status.blocks_slot())
            .count() as u32;

        let month = month_of(today);
        let incomes = self.provider.list_incomes(salon_id, month).await?;
        let expenses = self.provider.list_expenses(salon_id, month).await?;
        let month_income: f64 = incomes.iter().map(|i| i.income.amount).sum();
        let month_expense: f64 = expenses.iter().map(|e| e.amount).sum();

        let client_count = self.provider.list_clients(salon_id).await?.len() as u32;
        let active_worker_count = self
            .provider
            .list_workers(salon_id)
            .await?
            .iter()
            .filter(|w| w.active)
            .count() as u32;

        Ok(DashboardSummary {
            today_bookings,
            upcoming_bookings,
            month_income,
            month_expense,
            month_net: month_income - month_expense,
            client_count,
            active_worker_count,
        })
    }

    /// Per-worker completed bookings and earned revenue share over a period.
    /// Every worker of the salon appears, including ones with no activity.
    pub async fn team_performance(
        &self,
        salon_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<TeamMemberStats>, StatsError> {
        let workers = self.provider.list_workers(salon_id).await?;
        let mut stats: Vec<TeamMemberStats> = workers
            .into_iter()
            .map(|worker| TeamMemberStats {
                worker,
                completed_bookings: 0,
                revenue_share: 0.0,
            })
            .collect();

        let time_range = TimeRange {
            from: range
                .from
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|t| t.and_utc()),
            to: range
                .to
                .and_then(|d| d.succ_opt())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|t| t.and_utc()),
        };
        let bookings = self.provider.list_bookings(salon_id, time_range).await?;
        for booking in bookings {
            if booking.status != BookingStatus::Completed {
                continue;
            }
            let details = self.provider.get_booking_details(booking.id).await?;
            for worker in &details.workers {
                if let Some(entry) = stats.iter_mut().find(|s| s.worker.id == worker.id) {
                    entry.completed_bookings += 1;
                }
            }
        }

        let incomes = self.provider.list_incomes(salon_id, range).await?;
        for details in incomes {
            for split in details.splits {
                if let Some(entry) = stats.iter_mut().find(|s| s.worker.id == split.worker_id) {
                    entry.revenue_share += details.income.amount * split.percentage / 100.0;
                }
            }
        }

        Ok(stats)
    }
}

/// Inclusive date range covering the calendar month of `day`.
fn month_of(day: NaiveDate) -> DateRange {
    let from = day.with_day(1);
    let to = from
        .and_then(|first| {
            if first.month() == 12 {
                NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
            }
        })
        .and_then(|next_month| next_month.pred_opt());
    DateRange { from, to }
}
