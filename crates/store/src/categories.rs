//! In-memory category registry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tally_core::category::Category;
use tally_core::store::{CategoryRegistry, StoreError};
use tally_shared::types::{CategoryId, UserId};

/// Category registry backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRegistry {
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRegistry for InMemoryCategoryRegistry {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn find_accessible(&self, user_id: UserId) -> Result<Vec<Category>, StoreError> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .filter(|c| c.is_system() || c.owner_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, category: Category) -> Result<(), StoreError> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category);
        Ok(())
    }

    async fn update(&self, category: Category) -> Result<(), StoreError> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(&category.id) {
            return Err(StoreError::NotFound);
        }
        categories.insert(category.id, category);
        Ok(())
    }

    async fn delete(&self, id: CategoryId) -> Result<(), StoreError> {
        let mut categories = self.categories.write().await;
        categories.remove(&id).ok_or(StoreError::NotFound)?;
        Ok(())
    }
}
