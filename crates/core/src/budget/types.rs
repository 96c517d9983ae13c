//! Budget threshold data types.

use serde::{Deserialize, Serialize};

/// Classification of cumulative spend against a category's monthly budget.
///
/// Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdState {
    /// Below the warning band, or budget tracking disabled.
    None,
    /// At or past 90% of the budget, up to and including the budget itself.
    Warning,
    /// Strictly above the budget.
    Exceeded,
}
