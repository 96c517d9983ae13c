//! Spending category registry rules.

pub mod error;
pub mod service;
pub mod types;

pub use error::CategoryError;
pub use service::CategoryService;
pub use types::{Category, CreateCategoryInput, UpdateCategoryInput};
