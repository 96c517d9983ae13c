//! Category error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors for category operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Category not found or not editable by this user.
    #[error("Custom category not found")]
    NotFound,

    /// Name is empty after trimming.
    #[error("Category name must not be empty")]
    EmptyName,

    /// Monthly budget must be non-negative.
    #[error("Monthly budget must not be negative")]
    NegativeBudget,

    /// Another accessible category already uses this name.
    #[error("Category name already used: {0}")]
    NameTaken(String),

    /// System-provided categories cannot be modified or deleted.
    #[error("System categories cannot be modified")]
    SystemImmutable,

    /// The category does not belong to the requesting user.
    #[error("Category belongs to another user")]
    Forbidden,

    /// Expenses still reference this category.
    #[error("Cannot delete category with {0} linked expenses")]
    HasLinkedExpenses(u64),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
