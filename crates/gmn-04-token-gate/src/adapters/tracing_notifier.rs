//! Notification sink that writes to the log.

use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::outbound::NotificationSink;
use tracing::{error, info};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Error => {
                error!(message = %n.message, description = %n.description, "Sign-in notification")
            }
            NotificationKind::Success | NotificationKind::Info => {
                info!(kind = ?n.kind, message = %n.message, description = %n.description, "Sign-in notification")
            }
        }
    }
}
