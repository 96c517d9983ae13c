//! Alert dispatch error types.

use thiserror::Error;

use crate::store::{ChannelError, StoreError};

/// Errors inside one alert dispatch attempt.
///
/// These never propagate to the write that triggered the dispatch; the
/// spawned task logs them and ends.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Store failure while resolving the category or spend.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The notification channel rejected or failed the send.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}
