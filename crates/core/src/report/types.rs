//! Report data types.
//!
//! Field names on the serialized shapes are a compatibility contract for
//! consumers and must not change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::CategoryId;

/// One category's spending within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category display name.
    pub name: String,
    /// Summed amount, rounded to 2 decimals for display.
    pub total: Decimal,
    /// The category's monthly budget; zero means untracked.
    pub budget: Decimal,
}

/// One month's total within a trend window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Short month/year label, e.g. `"Jan 2025"`.
    pub label: String,
    /// Summed total for the month; zero when there was no activity.
    pub total: Decimal,
}

/// Aggregates for one calendar-month period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Grand total: the raw group sums added up, rounded once at the end.
    /// May differ from the sum of the independently rounded rows.
    pub total: Decimal,
    /// Number of transactions in the period, counted independently of
    /// grouping.
    pub expense_count: u64,
    /// Per-category rows, ordered by descending total.
    pub by_category: Vec<AggregateRow>,
    /// First row after sorting, absent when the period has no rows.
    pub highest_category: Option<AggregateRow>,
}

/// The caller-facing monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// 1-based month number.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Grand total for the month.
    pub total: Decimal,
    /// Number of transactions in the month.
    pub expense_count: u64,
    /// Top spending category, if any.
    pub highest_category: Option<AggregateRow>,
    /// Per-category rows, ordered by descending total.
    pub by_category: Vec<AggregateRow>,
    /// Rolling multi-month trend ending at this month.
    pub trend: Vec<TrendPoint>,
}
