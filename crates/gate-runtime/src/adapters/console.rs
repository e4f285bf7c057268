//! Prints sign-in notifications for the CLI user.

use gmn_04_token_gate::{Notification, NotificationKind, NotificationSink};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn render(notification: &Notification) -> String {
        let marker = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✘",
            NotificationKind::Info => "ℹ",
        };
        format!(
            "{marker} {}: {}",
            notification.message, notification.description
        )
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => eprintln!("{}", Self::render(&notification)),
            _ => println!("{}", Self::render(&notification)),
        }
    }
}
