//! # Events and Effects
//!
//! The controller layer is a dispatcher: user input and settled
//! asynchronous work mutate the session and return a closed set of
//! [`Effect`]s. The event loop is the only place effects are executed,
//! which keeps every flow unit-testable without a terminal or network.

use std::time::Duration;

use serde_json::Value;

use crate::client::services::GatewayResult;

/// Request flows the client can have outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Search,
    Signup,
    Login,
    PasswordReset,
    UsernameCheck,
    Logout,
}

/// Timers the controller schedules. Each kind has a single pending
/// slot: arming a new timer bumps the generation and implicitly
/// cancels the one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Auto-dismiss of the live notification.
    Notification,
    /// Delayed navigation to the login page after a successful signup.
    SignupRedirect,
    /// Delayed close of the password-reset modal.
    ResetModalClose,
    /// Quiet period before the username-availability check fires.
    UsernameDebounce,
}

/// Messages delivered to the event loop by spawned tasks.
#[derive(Debug)]
pub enum LoopMessage {
    /// An outstanding request settled.
    Settled { flow: Flow, result: GatewayResult },
    /// A scheduled timer elapsed. Stale generations are discarded.
    Timer { kind: TimerKind, generation: u64 },
}

/// Side effects requested by the dispatch layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue a JSON POST through the gateway; the result comes back as
    /// a [`LoopMessage::Settled`].
    Post {
        flow: Flow,
        path: &'static str,
        body: Value,
    },
    /// Arm a one-shot timer; elapsing delivers [`LoopMessage::Timer`].
    Schedule {
        kind: TimerKind,
        generation: u64,
        delay: Duration,
    },
}

impl Effect {
    pub fn is_post(&self) -> bool {
        matches!(self, Effect::Post { .. })
    }
}
