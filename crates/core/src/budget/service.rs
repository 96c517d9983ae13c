//! Budget service for threshold classification.

use rust_decimal::{Decimal, RoundingStrategy};

use super::types::ThresholdState;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Classifies cumulative spend against a monthly budget.
    ///
    /// A non-positive budget disables tracking and always yields
    /// [`ThresholdState::None`]. Boundaries are inclusive: spend at exactly
    /// 90% or exactly 100% of the budget is a warning; only spend strictly
    /// above the budget is exceeded.
    #[must_use]
    pub fn classify_spend(spent: Decimal, budget: Decimal) -> ThresholdState {
        if budget <= Decimal::ZERO {
            return ThresholdState::None;
        }
        if spent > budget {
            return ThresholdState::Exceeded;
        }
        // spent/budget >= 0.9 without dividing
        if spent * Decimal::TEN >= budget * Decimal::from(9) {
            return ThresholdState::Warning;
        }
        ThresholdState::None
    }

    /// Returns spend as a whole percentage of budget, rounded half away
    /// from zero.
    ///
    /// Callers must ensure `budget > 0`; used for alert copy only.
    #[must_use]
    pub fn spend_percent(spent: Decimal, budget: Decimal) -> Decimal {
        (spent / budget * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}
