//! Collaborator interfaces for persistence and notification delivery.
//!
//! The engine never talks to a concrete database or mail provider; it is
//! written against these traits. `tally-store` ships in-memory reference
//! implementations, `tally_shared::EmailService` backs the notification
//! channel over SMTP.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use tally_shared::types::{CategoryId, ExpenseId, UserId};

use crate::category::Category;
use crate::expense::Expense;

/// Errors surfaced by store collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("Record not found")]
    NotFound,

    /// Backend failure (connection, corruption, ...).
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by notification channels.
#[derive(Debug, Error)]
#[error("Notification channel error: {0}")]
pub struct ChannelError(pub String);

/// Persistence for expense transactions.
///
/// Range queries use half-open `[start, end)` date intervals; a read
/// reflects whatever has committed at query time, nothing stronger.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Returns the user's expenses with `start <= date < end`.
    async fn find_in_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, StoreError>;

    /// Counts the user's expenses with `start <= date < end`.
    async fn count_in_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, StoreError>;

    /// Returns one of the user's expenses by id.
    async fn find_by_id(
        &self,
        user_id: UserId,
        id: ExpenseId,
    ) -> Result<Option<Expense>, StoreError>;

    /// Returns all of the user's expenses.
    async fn find_all(&self, user_id: UserId) -> Result<Vec<Expense>, StoreError>;

    /// Counts the user's expenses referencing the given category.
    async fn count_by_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<u64, StoreError>;

    /// Inserts a new expense.
    async fn insert(&self, expense: Expense) -> Result<(), StoreError>;

    /// Replaces an existing expense.
    ///
    /// Returns [`StoreError::NotFound`] if no expense with that id exists.
    async fn update(&self, expense: Expense) -> Result<(), StoreError>;

    /// Deletes one of the user's expenses.
    ///
    /// Returns [`StoreError::NotFound`] if no expense with that id exists.
    async fn delete(&self, user_id: UserId, id: ExpenseId) -> Result<(), StoreError>;
}

/// Persistence for spending categories.
#[async_trait]
pub trait CategoryRegistry: Send + Sync {
    /// Returns a category by id.
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Returns the categories visible to a user: system-provided plus
    /// user-owned.
    async fn find_accessible(&self, user_id: UserId) -> Result<Vec<Category>, StoreError>;

    /// Inserts a new category.
    async fn insert(&self, category: Category) -> Result<(), StoreError>;

    /// Replaces an existing category.
    async fn update(&self, category: Category) -> Result<(), StoreError>;

    /// Deletes a category.
    async fn delete(&self, id: CategoryId) -> Result<(), StoreError>;
}

/// Outbound notification delivery (email, push, webhook - opaque here).
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers one message to one address.
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), ChannelError>;
}

#[async_trait]
impl NotificationChannel for tally_shared::EmailService {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), ChannelError> {
        self.send_email(address, subject, body)
            .await
            .map_err(|e| ChannelError(e.to_string()))
    }
}
