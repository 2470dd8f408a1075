//! # Notification Model
//!
//! A transient user-facing message with a severity level. At most one
//! notification is live at a time; ownership of the dismiss timer is
//! handled by the notification service.

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Success,
}

impl Severity {
    /// Short tag used by the text renderer.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
            Severity::Success => "OK",
        }
    }
}

/// A single transient message shown on the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub text: String,
    pub severity: Severity,
}

impl NotificationMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}
