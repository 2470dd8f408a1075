//! # Application Controller
//!
//! Owns the event loop: user input and settled asynchronous work are
//! dispatched into the session, the effects they return are executed,
//! and the view is re-rendered. All state lives on this single task;
//! spawned work only ever reports back through the message channel.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::client::controllers::{auth, search};
use crate::client::events::{Effect, Flow, LoopMessage, TimerKind};
use crate::client::io::EventStream;
use crate::client::models::{LoginField, Modal, Page, Session, SignupField};
use crate::client::services::Gateway;
use crate::client::views::ViewRenderer;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The main controller wiring input, session state, effects and
/// rendering together.
pub struct AppController<ES: EventStream, R: ViewRenderer> {
    session: Session,
    gateway: Arc<dyn Gateway>,
    event_stream: ES,
    renderer: R,
    message_tx: mpsc::Sender<LoopMessage>,
    message_rx: mpsc::Receiver<LoopMessage>,
    should_quit: bool,
    dirty: bool,
}

impl<ES: EventStream, R: ViewRenderer> AppController<ES, R> {
    /// Create a controller with injected I/O and service capabilities.
    pub fn with_io(
        gateway: Arc<dyn Gateway>,
        session: Session,
        event_stream: ES,
        renderer: R,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::channel(32);
        Self {
            session,
            gateway,
            event_stream,
            renderer,
            message_tx,
            message_rx,
            should_quit: false,
            dirty: false,
        }
    }

    /// Run the main loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.renderer.initialize()?;
        self.renderer.render(&self.session)?;

        while !self.should_quit {
            if self.event_stream.poll(INPUT_POLL_INTERVAL)? {
                if let Event::Key(key_event) = self.event_stream.read()? {
                    self.process_key_event(key_event)?;
                }
            }

            while let Ok(message) = self.message_rx.try_recv() {
                self.handle_message(message);
            }

            if self.dirty && !self.should_quit {
                self.renderer.render(&self.session)?;
                self.dirty = false;
            }
        }

        self.renderer.cleanup()
    }

    /// Process a single key event outside the full loop (also the test
    /// entry point, like the rest of the public surface here).
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind == KeyEventKind::Release {
            return Ok(());
        }
        tracing::trace!("key event: {key_event:?}");
        let effects = self.dispatch_key(key_event);
        self.apply_effects(effects);
        self.dirty = true;
        Ok(())
    }

    /// Handle one message from spawned work.
    pub fn handle_message(&mut self, message: LoopMessage) {
        let effects = match message {
            LoopMessage::Settled { flow, result } => match flow {
                Flow::Search => search::settle(&mut self.session, result),
                Flow::Signup => auth::settle_signup(&mut self.session, result),
                Flow::Login => auth::settle_login(&mut self.session, result),
                Flow::PasswordReset => auth::settle_reset(&mut self.session, result),
                Flow::UsernameCheck => auth::settle_username_check(&mut self.session, result),
                Flow::Logout => auth::settle_logout(&mut self.session, result),
            },
            LoopMessage::Timer { kind, generation } => self.handle_timer(kind, generation),
        };
        self.apply_effects(effects);
        self.dirty = true;
    }

    fn handle_timer(&mut self, kind: TimerKind, generation: u64) -> Vec<Effect> {
        match kind {
            // The notification service tracks its own generation.
            TimerKind::Notification => {
                self.session.notifications.expire(generation);
                Vec::new()
            }
            _ if !self.session.timer_current(kind, generation) => {
                tracing::trace!("discarding stale {kind:?} timer");
                Vec::new()
            }
            TimerKind::SignupRedirect => {
                self.session.enter_login();
                Vec::new()
            }
            TimerKind::ResetModalClose => {
                self.session.close_reset_modal();
                Vec::new()
            }
            TimerKind::UsernameDebounce => auth::username_check_due(&self.session),
        }
    }

    /// Execute effects: network posts and timers are spawned; their
    /// results come back through the message channel.
    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Post { flow, path, body } => {
                    let future = self.gateway.post(path, body);
                    let sender = self.message_tx.clone();
                    tokio::spawn(async move {
                        let result = future.await;
                        // The receiver only drops on shutdown.
                        let _ = sender.send(LoopMessage::Settled { flow, result }).await;
                    });
                }
                Effect::Schedule {
                    kind,
                    generation,
                    delay,
                } => {
                    let sender = self.message_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = sender.send(LoopMessage::Timer { kind, generation }).await;
                    });
                }
            }
        }
    }

    // === Key dispatch ===

    fn dispatch_key(&mut self, key_event: KeyEvent) -> Vec<Effect> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return self.dispatch_chord(key_event.code);
        }
        if self.session.modal == Some(Modal::ForgotPassword) {
            return self.dispatch_reset_modal(key_event.code);
        }
        match self.session.page {
            Page::Home => self.dispatch_home(key_event.code),
            Page::Login => self.dispatch_login(key_event.code),
            Page::Signup => self.dispatch_signup(key_event.code),
        }
    }

    fn dispatch_chord(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Char('c') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('l') => {
                self.session.enter_login();
                Vec::new()
            }
            KeyCode::Char('n') => {
                self.session.enter_signup();
                Vec::new()
            }
            KeyCode::Char('r') if self.session.page == Page::Login => {
                self.session.open_reset_modal();
                Vec::new()
            }
            KeyCode::Char('d') => auth::logout(&mut self.session),
            _ => Vec::new(),
        }
    }

    fn dispatch_reset_modal(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Esc => {
                self.session.close_reset_modal();
                Vec::new()
            }
            KeyCode::Enter => auth::submit_reset(&mut self.session),
            KeyCode::Char(ch) => {
                self.session.reset_email.push(ch);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.session.reset_email.pop();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn dispatch_home(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Enter => search::submit(&mut self.session),
            KeyCode::Char(ch) => {
                self.session.search.input.push(ch);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.session.search.input.pop();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn dispatch_login(&mut self, code: KeyCode) -> Vec<Effect> {
        match code {
            KeyCode::Esc => {
                self.session.enter_home();
                Vec::new()
            }
            KeyCode::Tab => {
                self.session.login.focus_next();
                Vec::new()
            }
            KeyCode::BackTab => {
                self.session.login.focus_previous();
                Vec::new()
            }
            KeyCode::Enter => auth::submit_login(&mut self.session),
            KeyCode::Char(' ') if self.session.login.focus == LoginField::RememberMe => {
                self.session.login.remember_me = !self.session.login.remember_me;
                Vec::new()
            }
            KeyCode::Char(ch) => {
                match self.session.login.focus {
                    LoginField::Username => self.session.login.username.push(ch),
                    LoginField::Password => self.session.login.password.push(ch),
                    LoginField::RememberMe => {}
                }
                Vec::new()
            }
            KeyCode::Backspace => {
                match self.session.login.focus {
                    LoginField::Username => {
                        self.session.login.username.pop();
                    }
                    LoginField::Password => {
                        self.session.login.password.pop();
                    }
                    LoginField::RememberMe => {}
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn dispatch_signup(&mut self, code: KeyCode) -> Vec<Effect> {
        let focus = self.session.signup.focus;
        match code {
            KeyCode::Esc => {
                self.session.enter_home();
                Vec::new()
            }
            KeyCode::Tab => {
                self.session.signup.focus_next();
                Vec::new()
            }
            KeyCode::BackTab => {
                self.session.signup.focus_previous();
                Vec::new()
            }
            KeyCode::Enter => auth::submit_signup(&mut self.session),
            KeyCode::Char(' ') if focus == SignupField::Terms => {
                self.session.signup.accept_terms = !self.session.signup.accept_terms;
                Vec::new()
            }
            KeyCode::Char(ch) => {
                if let Some(value) = self.session.signup.value_mut(focus) {
                    value.push(ch);
                    return auth::signup_field_edited(&mut self.session, focus);
                }
                Vec::new()
            }
            KeyCode::Backspace => {
                if let Some(value) = self.session.signup.value_mut(focus) {
                    value.pop();
                    return auth::signup_field_edited(&mut self.session, focus);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    // === Test accessors ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Await and handle the next message from spawned work. Returns
    /// false when the channel is closed.
    pub async fn pump_message(&mut self) -> bool {
        match self.message_rx.recv().await {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::services::{MemoryDraftStore, MemoryIdentityStore};
    use crate::client::testing::{ctrl, key, CapturingRenderer, ScriptedEventStream, ScriptedGateway};

    fn controller() -> AppController<ScriptedEventStream, CapturingRenderer> {
        let session = Session::new(
            Box::new(MemoryDraftStore::new()),
            Box::new(MemoryIdentityStore::new()),
        );
        AppController::with_io(
            Arc::new(ScriptedGateway::new()),
            session,
            ScriptedEventStream::new(Vec::new()),
            CapturingRenderer::new(),
        )
    }

    #[tokio::test]
    async fn ctrl_c_requests_quit() {
        let mut app = controller();
        app.process_key_event(ctrl('c')).unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn typing_on_home_edits_the_query_input() {
        let mut app = controller();
        for ch in "hello".chars() {
            app.process_key_event(key(ch)).unwrap();
        }
        assert_eq!(app.session().search.input, "hello");

        app.process_key_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.session().search.input, "hell");
    }

    #[tokio::test]
    async fn chords_navigate_between_pages() {
        let mut app = controller();
        app.process_key_event(ctrl('l')).unwrap();
        assert_eq!(app.session().page, Page::Login);

        app.process_key_event(ctrl('n')).unwrap();
        assert_eq!(app.session().page, Page::Signup);

        app.process_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.session().page, Page::Home);
    }

    #[tokio::test]
    async fn reset_modal_captures_input_while_open() {
        let mut app = controller();
        app.process_key_event(ctrl('l')).unwrap();
        app.process_key_event(ctrl('r')).unwrap();
        assert_eq!(app.session().modal, Some(Modal::ForgotPassword));

        for ch in "a@b.co".chars() {
            app.process_key_event(key(ch)).unwrap();
        }
        assert_eq!(app.session().reset_email, "a@b.co");
        // Typing in the modal must not leak into the login form.
        assert_eq!(app.session().login.username, "");

        app.process_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.session().modal, None);
        assert_eq!(app.session().reset_email, "");
    }

    #[tokio::test]
    async fn stale_debounce_timer_fires_no_request() {
        let gateway = Arc::new(ScriptedGateway::new());
        let session = Session::new(
            Box::new(MemoryDraftStore::new()),
            Box::new(MemoryIdentityStore::new()),
        );
        let mut app = AppController::with_io(
            gateway.clone(),
            session,
            ScriptedEventStream::new(Vec::new()),
            CapturingRenderer::new(),
        );

        app.session_mut().enter_signup();
        app.session_mut().signup.username = "ada_l".into();
        let stale = app.session_mut().arm_timer(TimerKind::UsernameDebounce);
        let current = app.session_mut().arm_timer(TimerKind::UsernameDebounce);

        app.handle_message(LoopMessage::Timer {
            kind: TimerKind::UsernameDebounce,
            generation: stale,
        });
        assert!(gateway.calls().is_empty());

        app.handle_message(LoopMessage::Timer {
            kind: TimerKind::UsernameDebounce,
            generation: current,
        });
        assert_eq!(gateway.calls().len(), 1);
    }
}
