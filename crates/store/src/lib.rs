//! In-memory collaborator implementations for the Tally engine.
//!
//! The engine in `tally-core` is written against the collaborator traits
//! in `tally_core::store`; durable persistence is out of scope for this
//! workspace. This crate provides reference implementations backed by
//! in-process maps, used by the demo binary and by the engine's
//! integration tests:
//!
//! - [`InMemoryTransactionStore`] - expense persistence
//! - [`InMemoryCategoryRegistry`] - category persistence
//! - [`RecordingChannel`] - a notification channel that captures sends

pub mod categories;
pub mod channel;
pub mod transactions;

pub use categories::InMemoryCategoryRegistry;
pub use channel::{RecordingChannel, SentMessage};
pub use transactions::InMemoryTransactionStore;
