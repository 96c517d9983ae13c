//! Report generation service.
//!
//! All operations here are stateless, side-effect-free reads: each call is
//! a pure function of the store contents at query time.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use tally_shared::types::{CategoryId, UserId};

use super::types::{AggregateRow, MonthlySummary, PeriodSummary, TrendPoint};
use crate::category::Category;
use crate::period::Month;
use crate::store::{CategoryRegistry, StoreError, TransactionStore};

/// Number of months in the default trend window.
pub const DEFAULT_TREND_WINDOW: u32 = 6;

/// Service for period aggregates and trends.
#[derive(Clone)]
pub struct ReportService {
    transactions: Arc<dyn TransactionStore>,
    categories: Arc<dyn CategoryRegistry>,
}

impl ReportService {
    /// Creates a new report service.
    #[must_use]
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        categories: Arc<dyn CategoryRegistry>,
    ) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// Aggregates one month of the user's spending by category.
    ///
    /// Groups the period's transactions by category, joins display name and
    /// budget against the registry, and orders rows by descending total
    /// (category id as the deterministic tiebreak). A group whose category
    /// no longer resolves is dropped rather than failing the report; its
    /// transactions still show up in `expense_count`, which is an
    /// independent raw count.
    ///
    /// Row totals are rounded to 2 decimals independently; the grand total
    /// is the sum of the *raw* group sums rounded once, so it may differ
    /// from the sum of the displayed rows.
    pub async fn summarize(
        &self,
        user_id: UserId,
        month: Month,
    ) -> Result<PeriodSummary, StoreError> {
        let period = month.period();
        let expenses = self
            .transactions
            .find_in_range(user_id, period.start, period.end)
            .await?;
        let expense_count = self
            .transactions
            .count_in_range(user_id, period.start, period.end)
            .await?;

        let mut sums: HashMap<CategoryId, Decimal> = HashMap::new();
        for expense in &expenses {
            *sums.entry(expense.category_id).or_default() += expense.amount;
        }

        let catalog: HashMap<CategoryId, Category> = self
            .categories
            .find_accessible(user_id)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let mut groups: Vec<(CategoryId, Decimal)> = sums
            .into_iter()
            .filter(|(id, _)| catalog.contains_key(id))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let raw_total: Decimal = groups.iter().map(|(_, sum)| *sum).sum();
        let by_category: Vec<AggregateRow> = groups
            .into_iter()
            .map(|(id, raw)| {
                let category = &catalog[&id];
                AggregateRow {
                    category_id: id,
                    name: category.name.clone(),
                    total: raw.round_dp(2),
                    budget: category.monthly_budget,
                }
            })
            .collect();
        let highest_category = by_category.first().cloned();

        Ok(PeriodSummary {
            total: raw_total.round_dp(2),
            expense_count,
            by_category,
            highest_category,
        })
    }

    /// Returns the user's raw (unrounded) spend for one category in one
    /// month.
    pub async fn category_spend(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        month: Month,
    ) -> Result<Decimal, StoreError> {
        let period = month.period();
        let expenses = self
            .transactions
            .find_in_range(user_id, period.start, period.end)
            .await?;
        Ok(expenses
            .iter()
            .filter(|e| e.category_id == category_id)
            .map(|e| e.amount)
            .sum())
    }

    /// Builds a trend of exactly `window` monthly totals, oldest first,
    /// ending at `month`.
    ///
    /// Fetches the whole window as one range query and re-buckets in
    /// memory; months with no activity yield a zero point.
    pub async fn trend(
        &self,
        user_id: UserId,
        month: Month,
        window: u32,
    ) -> Result<Vec<TrendPoint>, StoreError> {
        if window == 0 {
            return Ok(Vec::new());
        }

        let oldest = month.minus_months(window - 1);
        let expenses = self
            .transactions
            .find_in_range(user_id, oldest.first_day(), month.period().end)
            .await?;

        let mut buckets: HashMap<Month, Decimal> = HashMap::new();
        for expense in &expenses {
            *buckets.entry(Month::containing(expense.date)).or_default() += expense.amount;
        }

        let points = (0..window)
            .rev()
            .map(|offset| {
                let point_month = month.minus_months(offset);
                TrendPoint {
                    label: point_month.label(),
                    total: buckets
                        .get(&point_month)
                        .copied()
                        .unwrap_or_default()
                        .round_dp(2),
                }
            })
            .collect();
        Ok(points)
    }

    /// Builds the caller-facing monthly summary: the month's aggregates
    /// plus the default trend window ending at that month.
    pub async fn monthly_summary(
        &self,
        user_id: UserId,
        month: Month,
    ) -> Result<MonthlySummary, StoreError> {
        let summary = self.summarize(user_id, month).await?;
        let trend = self.trend(user_id, month, DEFAULT_TREND_WINDOW).await?;

        Ok(MonthlySummary {
            month: month.month(),
            year: month.year(),
            total: summary.total,
            expense_count: summary.expense_count,
            highest_category: summary.highest_category,
            by_category: summary.by_category,
            trend,
        })
    }
}
