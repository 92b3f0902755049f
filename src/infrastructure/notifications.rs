use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::domain::{errors::DomainError, events::StoreNotification};

/// Push boundary for store mutations. Injected into the services; callers
/// treat every emit as best-effort and swallow failures.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn emit(&self, notification: &StoreNotification) -> Result<(), DomainError>;
}

/// The `{event, data}` envelope subscribers receive.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage {
    pub event: String,
    pub data: Value,
}

/// Broadcast-channel sink; every live subscriber gets every envelope.
pub struct EventBroadcaster {
    tx: broadcast::Sender<NotificationMessage>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationMessage> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl NotificationSink for EventBroadcaster {
    async fn emit(&self, notification: &StoreNotification) -> Result<(), DomainError> {
        let message = NotificationMessage {
            event: notification.name().to_string(),
            data: notification.payload(),
        };
        // A send error only means nobody is subscribed right now.
        let _ = self.tx.send(message);
        Ok(())
    }
}

#[cfg(test)]
pub use test_sinks::{FailingSink, RecordingSink};

#[cfg(test)]
mod test_sinks {
    use std::sync::Mutex;

    use super::*;

    /// Captures emitted notifications for assertions.
    #[derive(Default)]
    pub struct RecordingSink {
        emitted: Mutex<Vec<StoreNotification>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn emitted(&self) -> Vec<StoreNotification> {
            self.emitted.lock().expect("sink lock").clone()
        }
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn emit(&self, notification: &StoreNotification) -> Result<(), DomainError> {
            self.emitted
                .lock()
                .expect("sink lock")
                .push(notification.clone());
            Ok(())
        }
    }

    /// Always fails, to prove mutations never depend on delivery.
    pub struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn emit(&self, _notification: &StoreNotification) -> Result<(), DomainError> {
            Err(DomainError::internal("notification channel is down"))
        }
    }
}
