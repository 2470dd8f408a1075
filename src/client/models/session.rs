//! # Session Model
//!
//! The aggregate mutable state behind every surface: current page,
//! form contents, search outcome, the live notification, and the two
//! injected persistence scopes. Controllers mutate this model and
//! return effects; the event loop owns it exclusively, so no locking
//! is needed.

use std::time::Duration;

use crate::client::events::{Effect, Flow, TimerKind};
use crate::client::models::{LoginForm, SearchState, Severity, SignupField, SignupForm};
use crate::client::services::{notification, DraftField, DraftStore, IdentityStore, NotificationService};

/// Top-level pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Login,
    Signup,
}

/// Modal surfaces layered over the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    ForgotPassword,
}

/// One in-flight flag per submitting flow, so a control cannot start a
/// second overlapping request before the first settles.
#[derive(Debug, Default)]
struct InFlight {
    search: bool,
    signup: bool,
    login: bool,
    reset: bool,
}

/// Single pending-timer slot per timer kind. Arming bumps the
/// generation; a timer firing with an older generation is stale.
#[derive(Debug, Default)]
struct TimerSlots {
    generations: [u64; 4],
}

impl TimerSlots {
    fn slot(kind: TimerKind) -> usize {
        match kind {
            TimerKind::Notification => 0,
            TimerKind::SignupRedirect => 1,
            TimerKind::ResetModalClose => 2,
            TimerKind::UsernameDebounce => 3,
        }
    }

    fn arm(&mut self, kind: TimerKind) -> u64 {
        let slot = Self::slot(kind);
        self.generations[slot] += 1;
        self.generations[slot]
    }

    fn is_current(&self, kind: TimerKind, generation: u64) -> bool {
        self.generations[Self::slot(kind)] == generation
    }
}

/// Aggregate client state.
pub struct Session {
    pub page: Page,
    pub modal: Option<Modal>,
    pub search: SearchState,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub reset_email: String,
    /// Username of the signed-in account, if any.
    pub authenticated: Option<String>,
    /// Latest advisory result of the username-availability check.
    pub username_available: Option<bool>,
    pub notifications: NotificationService,
    pub drafts: Box<dyn DraftStore>,
    pub identity: Box<dyn IdentityStore>,
    in_flight: InFlight,
    timers: TimerSlots,
}

impl Session {
    pub fn new(drafts: Box<dyn DraftStore>, identity: Box<dyn IdentityStore>) -> Self {
        Self {
            page: Page::Home,
            modal: None,
            search: SearchState::default(),
            login: LoginForm::default(),
            signup: SignupForm::default(),
            reset_email: String::new(),
            authenticated: None,
            username_available: None,
            notifications: NotificationService::new(),
            drafts,
            identity,
            in_flight: InFlight::default(),
            timers: TimerSlots::default(),
        }
    }

    // === Notifications ===

    /// Show a notification and return the schedule effect for its
    /// dismiss timer. The newest message owns the only active timer.
    pub fn notify(&mut self, text: impl Into<String>, severity: Severity) -> Effect {
        let generation = self.notifications.show(text, severity);
        Effect::Schedule {
            kind: TimerKind::Notification,
            generation,
            delay: notification::DISMISS_AFTER,
        }
    }

    // === In-flight flags ===

    pub fn in_flight(&self, flow: Flow) -> bool {
        match flow {
            Flow::Search => self.in_flight.search,
            Flow::Signup => self.in_flight.signup,
            Flow::Login => self.in_flight.login,
            Flow::PasswordReset => self.in_flight.reset,
            // Advisory flows are never gated.
            Flow::UsernameCheck | Flow::Logout => false,
        }
    }

    pub fn set_in_flight(&mut self, flow: Flow, value: bool) {
        match flow {
            Flow::Search => self.in_flight.search = value,
            Flow::Signup => self.in_flight.signup = value,
            Flow::Login => self.in_flight.login = value,
            Flow::PasswordReset => self.in_flight.reset = value,
            Flow::UsernameCheck | Flow::Logout => {}
        }
    }

    // === Timers ===

    /// Arm the single pending-timer slot for `kind`, cancelling any
    /// prior pending timer of the same kind.
    pub fn arm_timer(&mut self, kind: TimerKind) -> u64 {
        self.timers.arm(kind)
    }

    pub fn timer_current(&self, kind: TimerKind, generation: u64) -> bool {
        self.timers.is_current(kind, generation)
    }

    /// Arm a timer and return the matching schedule effect.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) -> Effect {
        let generation = self.arm_timer(kind);
        Effect::Schedule {
            kind,
            generation,
            delay,
        }
    }

    // === Navigation ===

    pub fn enter_home(&mut self) {
        self.page = Page::Home;
        self.modal = None;
    }

    /// Switch to the login page, prefilling the username from the
    /// remembered identity when one exists.
    pub fn enter_login(&mut self) {
        self.page = Page::Login;
        self.modal = None;
        self.login = LoginForm::default();
        if let Some(username) = self.identity.recall() {
            self.login.username = username;
            self.login.remember_me = true;
        }
    }

    /// Switch to the signup page, repopulating whitelisted fields from
    /// the draft scope.
    pub fn enter_signup(&mut self) {
        self.page = Page::Signup;
        self.modal = None;
        self.signup = SignupForm::default();
        self.username_available = None;
        for (field, value) in self.drafts.get_all() {
            let target = match field {
                DraftField::FirstName => SignupField::FirstName,
                DraftField::LastName => SignupField::LastName,
                DraftField::Username => SignupField::Username,
                DraftField::Email => SignupField::Email,
            };
            if let Some(slot) = self.signup.value_mut(target) {
                *slot = value;
            }
        }
    }

    pub fn open_reset_modal(&mut self) {
        self.modal = Some(Modal::ForgotPassword);
        self.reset_email.clear();
    }

    pub fn close_reset_modal(&mut self) {
        self.modal = None;
        self.reset_email.clear();
    }
}
