//! # Notification Service
//!
//! Single-slot surface for transient messages. A new message replaces
//! the live one (no queueing, no stacking) and takes ownership of the
//! only dismiss timer: expiry carries the generation it was armed for,
//! and a stale generation is a no-op.

use std::time::Duration;

use crate::client::models::{NotificationMessage, Severity};

/// How long a notification stays up before auto-dismissing.
pub const DISMISS_AFTER: Duration = Duration::from_secs(4);

/// The single live notification plus the generation stamp that ties it
/// to its dismiss timer.
#[derive(Debug, Default)]
pub struct NotificationService {
    current: Option<NotificationMessage>,
    generation: u64,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message, superseding any live one. Returns the generation
    /// the caller must attach to the dismiss timer it schedules.
    pub fn show(&mut self, text: impl Into<String>, severity: Severity) -> u64 {
        self.generation += 1;
        self.current = Some(NotificationMessage::new(text, severity));
        self.generation
    }

    /// Dismiss the message owning `generation`. Expiries armed for a
    /// superseded message do not touch the newer one.
    pub fn expire(&mut self, generation: u64) {
        if generation == self.generation {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&NotificationMessage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_should_replace_the_live_message() {
        let mut service = NotificationService::new();
        service.show("first", Severity::Info);
        service.show("second", Severity::Error);

        let current = service.current().unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn expire_should_dismiss_the_owning_generation() {
        let mut service = NotificationService::new();
        let generation = service.show("hello", Severity::Info);
        service.expire(generation);
        assert!(service.current().is_none());
    }

    #[test]
    fn stale_expiry_should_leave_the_newer_message_visible() {
        let mut service = NotificationService::new();
        let first = service.show("first", Severity::Info);
        let _second = service.show("second", Severity::Success);

        // The timer armed for the first message fires after it was
        // superseded; the second message must survive.
        service.expire(first);
        assert_eq!(service.current().unwrap().text, "second");
    }

    #[test]
    fn expire_on_empty_slot_is_a_no_op() {
        let mut service = NotificationService::new();
        service.expire(42);
        assert!(service.current().is_none());
    }
}
