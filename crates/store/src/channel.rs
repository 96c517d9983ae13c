//! A notification channel that records sends in memory.

use async_trait::async_trait;
use tokio::sync::RwLock;

use tally_core::store::{ChannelError, NotificationChannel};

/// One captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Delivery address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Notification channel that captures every send instead of delivering.
///
/// A failure message can be injected to exercise the dispatcher's failure
/// isolation.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: RwLock<Vec<SentMessage>>,
    failure: RwLock<Option<String>>,
}

impl RecordingChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message sent so far.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().await.clone()
    }

    /// Makes every subsequent send fail with the given message.
    pub async fn fail_with(&self, message: &str) {
        *self.failure.write().await = Some(message.to_string());
    }

    /// Clears an injected failure.
    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), ChannelError> {
        if let Some(message) = self.failure.read().await.clone() {
            return Err(ChannelError(message));
        }
        self.sent.write().await.push(SentMessage {
            to: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
