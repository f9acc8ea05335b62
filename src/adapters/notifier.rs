use crate::domain::ports::FailureNotifier;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// Prints failures for a person at a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl FailureNotifier for ConsoleNotifier {
    fn notify_failure(&self, message: &str) {
        tracing::warn!("Notifying user: {}", message);
        eprintln!("❌ {}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Keeps every notification in memory. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications().is_empty()
    }
}

impl FailureNotifier for RecordingNotifier {
    fn notify_failure(&self, message: &str) {
        if let Ok(mut log) = self.notifications.lock() {
            log.push(Notification {
                message: message.to_string(),
                at: Utc::now(),
            });
        }
    }
}
