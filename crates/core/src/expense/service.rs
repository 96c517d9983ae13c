//! Expense recording business rules.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use tally_shared::types::{CategoryId, ExpenseId, UserId};

use super::error::ExpenseError;
use super::types::{Expense, ExpenseInput, MAX_NOTE_LEN};
use crate::notify::{AlertRecipient, BudgetAlertService};
use crate::period::Month;
use crate::store::{CategoryRegistry, TransactionStore};

/// Expense service.
///
/// Successful creates and updates hand the affected category and month to
/// the budget alert dispatcher; dispatch runs detached and never affects
/// the mutation's outcome.
#[derive(Clone)]
pub struct ExpenseService {
    transactions: Arc<dyn TransactionStore>,
    categories: Arc<dyn CategoryRegistry>,
    alerts: BudgetAlertService,
}

impl ExpenseService {
    /// Creates a new expense service.
    #[must_use]
    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        categories: Arc<dyn CategoryRegistry>,
        alerts: BudgetAlertService,
    ) -> Self {
        Self {
            transactions,
            categories,
            alerts,
        }
    }

    /// Records a new expense for the user.
    pub async fn create(
        &self,
        user: &AlertRecipient,
        input: ExpenseInput,
    ) -> Result<Expense, ExpenseError> {
        let note = validate_input(&input)?;
        self.ensure_allowed_category(user.user_id, input.category_id)
            .await?;

        let now = Utc::now();
        let expense = Expense {
            id: ExpenseId::new(),
            user_id: user.user_id,
            amount: input.amount,
            category_id: input.category_id,
            date: input.date,
            note,
            created_at: now,
            updated_at: now,
        };
        self.transactions.insert(expense.clone()).await?;
        debug!(expense_id = %expense.id, amount = %expense.amount, "expense recorded");

        self.alerts
            .notify_if_needed(user.clone(), expense.category_id, expense.date);
        Ok(expense)
    }

    /// Rewrites an existing expense's amount, category, date, and note.
    pub async fn update(
        &self,
        user: &AlertRecipient,
        id: ExpenseId,
        input: ExpenseInput,
    ) -> Result<Expense, ExpenseError> {
        let note = validate_input(&input)?;
        let Some(mut expense) = self.transactions.find_by_id(user.user_id, id).await? else {
            return Err(ExpenseError::NotFound);
        };
        self.ensure_allowed_category(user.user_id, input.category_id)
            .await?;

        expense.amount = input.amount;
        expense.category_id = input.category_id;
        expense.date = input.date;
        expense.note = note;
        expense.updated_at = Utc::now();
        self.transactions.update(expense.clone()).await?;

        self.alerts
            .notify_if_needed(user.clone(), expense.category_id, expense.date);
        Ok(expense)
    }

    /// Deletes one of the user's expenses. Never cascades.
    pub async fn delete(&self, user_id: UserId, id: ExpenseId) -> Result<(), ExpenseError> {
        if self.transactions.find_by_id(user_id, id).await?.is_none() {
            return Err(ExpenseError::NotFound);
        }
        self.transactions.delete(user_id, id).await?;
        Ok(())
    }

    /// Lists the user's expenses, optionally restricted to one month's
    /// period, newest first.
    pub async fn list(
        &self,
        user_id: UserId,
        month: Option<Month>,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let mut expenses = match month {
            Some(month) => {
                let period = month.period();
                self.transactions
                    .find_in_range(user_id, period.start, period.end)
                    .await?
            }
            None => self.transactions.find_all(user_id).await?,
        };
        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(expenses)
    }

    /// Fails unless the category is system-provided or owned by the user.
    async fn ensure_allowed_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<(), ExpenseError> {
        let allowed = self
            .categories
            .find_by_id(category_id)
            .await?
            .is_some_and(|c| c.is_system() || c.owner_id == Some(user_id));
        if allowed {
            Ok(())
        } else {
            Err(ExpenseError::InvalidCategory)
        }
    }
}

fn validate_input(input: &ExpenseInput) -> Result<String, ExpenseError> {
    if input.amount <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveAmount);
    }
    let note = input.note.clone().unwrap_or_default().trim().to_string();
    if note.chars().count() > MAX_NOTE_LEN {
        return Err(ExpenseError::NoteTooLong(note.chars().count()));
    }
    Ok(note)
}
