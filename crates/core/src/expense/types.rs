//! Expense data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::{CategoryId, ExpenseId, UserId};

/// Maximum note length in characters.
pub const MAX_NOTE_LEN: usize = 500;

/// A single dated, categorized expense.
///
/// Identity is immutable; amount, category, date, and note are mutable via
/// update. Time of day is irrelevant to bucketing, so the effective date is
/// a plain calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Monetary amount, positive, two-decimal currency semantics.
    pub amount: Decimal,
    /// Category reference.
    pub category_id: CategoryId,
    /// Effective calendar date.
    pub date: NaiveDate,
    /// Free-text note; empty when none was given.
    pub note: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating an expense.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    /// Monetary amount; must be positive.
    pub amount: Decimal,
    /// Category reference; must be system-provided or owned by the user.
    pub category_id: CategoryId,
    /// Effective calendar date.
    pub date: NaiveDate,
    /// Optional free-text note.
    pub note: Option<String>,
}
