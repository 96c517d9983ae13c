//! Category data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::types::{CategoryId, UserId};

/// A spending category.
///
/// A category with no owner is system-provided: visible to every user and
/// immutable by users. A zero monthly budget disables budget tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name, unique per owner (case-insensitive).
    pub name: String,
    /// Owning user; `None` for system-provided categories.
    pub owner_id: Option<UserId>,
    /// Monthly budget; zero means no budget tracking.
    pub monthly_budget: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Returns true for system-provided (unowned) categories.
    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.owner_id.is_none()
    }

    /// Returns true if budget tracking is enabled for this category.
    #[must_use]
    pub fn has_budget(&self) -> bool {
        self.monthly_budget > Decimal::ZERO
    }
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Display name; surrounding whitespace is trimmed.
    pub name: String,
    /// Monthly budget; zero disables tracking.
    pub monthly_budget: Decimal,
}

/// Input for updating a user-owned category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryInput {
    /// New display name.
    pub name: String,
    /// New monthly budget; `None` leaves the budget unchanged.
    pub monthly_budget: Option<Decimal>,
}
