//! Alert dispatch data types.

use serde::{Deserialize, Serialize};

use tally_shared::types::UserId;

/// The user an alert is addressed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecipient {
    /// User ID.
    pub user_id: UserId,
    /// Delivery address.
    pub email: String,
    /// Display name used in the alert copy.
    pub name: String,
}
