//! Shared types and configuration for Tally.
//!
//! This crate provides common pieces used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Configuration management
//! - SMTP email delivery

pub mod config;
pub mod email;
pub mod types;

pub use config::{AlertConfig, AppConfig, EmailConfig};
pub use email::{EmailError, EmailService};
