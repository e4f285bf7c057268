//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::notification::{Notification, NotificationKind};
use parking_lot::Mutex;

/// Where user-facing sign-in messages go.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Records every notification.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.sent.lock().last().cloned()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.sent.lock().iter().filter(|n| n.kind == kind).count()
    }
}

impl NotificationSink for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}
