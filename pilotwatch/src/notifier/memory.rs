use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::PilotResult;
use crate::notifier::base::Notifier;

/// One delivered notification, captured for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub subject: String,
    pub body: String,
}

/// In-memory notifier, used in tests to capture deliveries.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all notifications delivered so far.
    pub async fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().await.clone()
    }
}

impl Notifier for MemoryNotifier {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn notify(&self, subject: &str, body: &str) -> PilotResult<()> {
        self.sent.lock().await.push(SentNotification {
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
