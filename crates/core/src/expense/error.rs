//! Expense error types.

use thiserror::Error;

use super::types::MAX_NOTE_LEN;
use crate::store::StoreError;

/// Errors for expense operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Expense not found for this user.
    #[error("Expense not found")]
    NotFound,

    /// Category missing, or neither system-provided nor owned by the user.
    #[error("Invalid category")]
    InvalidCategory,

    /// Amount must be strictly positive.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Note exceeds the permitted length.
    #[error("Note exceeds {MAX_NOTE_LEN} characters (got {0})")]
    NoteTooLong(usize),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
