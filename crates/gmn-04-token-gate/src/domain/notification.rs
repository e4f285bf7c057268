use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// User-facing message about a sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub description: String,
}

impl Notification {
    pub fn success(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message, description)
    }

    pub fn error(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message, description)
    }

    pub fn info(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message, description)
    }

    fn new(kind: NotificationKind, message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            description: description.into(),
        }
    }
}
