//! Category registry business rules.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use tally_shared::types::{CategoryId, UserId};

use super::error::CategoryError;
use super::types::{Category, CreateCategoryInput, UpdateCategoryInput};
use crate::store::{CategoryRegistry, TransactionStore};

/// Category service.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRegistry>,
    transactions: Arc<dyn TransactionStore>,
}

impl CategoryService {
    /// Creates a new category service.
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoryRegistry>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            categories,
            transactions,
        }
    }

    /// Lists the categories visible to a user, system-provided first, then
    /// by name.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Category>, CategoryError> {
        let mut categories = self.categories.find_accessible(user_id).await?;
        categories.sort_by(|a, b| {
            a.is_system()
                .cmp(&b.is_system())
                .reverse()
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Creates a user-owned category.
    ///
    /// # Errors
    ///
    /// Rejects empty names, negative budgets, and names already used by an
    /// accessible category (case-insensitive).
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateCategoryInput,
    ) -> Result<Category, CategoryError> {
        let name = normalize_name(&input.name)?;
        if input.monthly_budget < Decimal::ZERO {
            return Err(CategoryError::NegativeBudget);
        }
        self.ensure_name_free(user_id, &name, None).await?;

        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name,
            owner_id: Some(user_id),
            monthly_budget: input.monthly_budget,
            created_at: now,
            updated_at: now,
        };
        self.categories.insert(category.clone()).await?;
        Ok(category)
    }

    /// Renames and/or re-budgets a user-owned category.
    ///
    /// System-provided categories and categories owned by other users are
    /// reported as not found, matching the lookup a user can perform.
    pub async fn update(
        &self,
        user_id: UserId,
        id: CategoryId,
        input: UpdateCategoryInput,
    ) -> Result<Category, CategoryError> {
        let Some(mut category) = self.categories.find_by_id(id).await? else {
            return Err(CategoryError::NotFound);
        };
        if category.is_system() || category.owner_id != Some(user_id) {
            return Err(CategoryError::NotFound);
        }

        let name = normalize_name(&input.name)?;
        self.ensure_name_free(user_id, &name, Some(id)).await?;

        category.name = name;
        if let Some(budget) = input.monthly_budget {
            if budget < Decimal::ZERO {
                return Err(CategoryError::NegativeBudget);
            }
            category.monthly_budget = budget;
        }
        category.updated_at = Utc::now();
        self.categories.update(category.clone()).await?;
        Ok(category)
    }

    /// Deletes a user-owned category with no linked expenses.
    pub async fn delete(&self, user_id: UserId, id: CategoryId) -> Result<(), CategoryError> {
        let Some(category) = self.categories.find_by_id(id).await? else {
            return Err(CategoryError::NotFound);
        };
        if category.is_system() {
            return Err(CategoryError::SystemImmutable);
        }
        if category.owner_id != Some(user_id) {
            return Err(CategoryError::Forbidden);
        }

        let linked = self.transactions.count_by_category(user_id, id).await?;
        if linked > 0 {
            return Err(CategoryError::HasLinkedExpenses(linked));
        }

        self.categories.delete(id).await?;
        Ok(())
    }

    /// Fails with [`CategoryError::NameTaken`] if an accessible category
    /// other than `exclude` already uses `name` (case-insensitive).
    async fn ensure_name_free(
        &self,
        user_id: UserId,
        name: &str,
        exclude: Option<CategoryId>,
    ) -> Result<(), CategoryError> {
        let accessible = self.categories.find_accessible(user_id).await?;
        let lowered = name.to_lowercase();
        let conflict = accessible
            .iter()
            .filter(|c| Some(c.id) != exclude)
            .any(|c| c.name.to_lowercase() == lowered);
        if conflict {
            return Err(CategoryError::NameTaken(name.to_string()));
        }
        Ok(())
    }
}

fn normalize_name(raw: &str) -> Result<String, CategoryError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    Ok(name.to_string())
}
