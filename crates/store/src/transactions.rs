//! In-memory expense store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use tally_core::expense::Expense;
use tally_core::store::{StoreError, TransactionStore};
use tally_shared::types::{CategoryId, ExpenseId, UserId};

/// Expense store backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
}

impl InMemoryTransactionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn find_in_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, StoreError> {
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.user_id == user_id && e.date >= start && e.date < end)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn count_in_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, StoreError> {
        let expenses = self.expenses.read().await;
        let count = expenses
            .values()
            .filter(|e| e.user_id == user_id && e.date >= start && e.date < end)
            .count();
        Ok(count as u64)
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: ExpenseId,
    ) -> Result<Option<Expense>, StoreError> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .get(&id)
            .filter(|e| e.user_id == user_id)
            .cloned())
    }

    async fn find_all(&self, user_id: UserId) -> Result<Vec<Expense>, StoreError> {
        let expenses = self.expenses.read().await;
        Ok(expenses
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_by_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<u64, StoreError> {
        let expenses = self.expenses.read().await;
        let count = expenses
            .values()
            .filter(|e| e.user_id == user_id && e.category_id == category_id)
            .count();
        Ok(count as u64)
    }

    async fn insert(&self, expense: Expense) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.id, expense);
        Ok(())
    }

    async fn update(&self, expense: Expense) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        if !expenses.contains_key(&expense.id) {
            return Err(StoreError::NotFound);
        }
        expenses.insert(expense.id, expense);
        Ok(())
    }

    async fn delete(&self, user_id: UserId, id: ExpenseId) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        match expenses.get(&id) {
            Some(e) if e.user_id == user_id => {
                expenses.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}
