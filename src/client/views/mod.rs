//! # Views
//!
//! Rendering is split in two: [`render_text`] derives the whole frame
//! as plain text from the session, and [`ViewRenderer`] implementations
//! put that text somewhere. Keeping the derivation pure means tests can
//! assert on rendered frames without a terminal.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::client::models::{
    FieldValidationState, LoginField, Modal, Page, SearchOutcome, Session, SignupField,
};
use crate::client::{password, validate};

/// Output surface for rendered frames.
pub trait ViewRenderer: Send {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, session: &Session) -> Result<()>;

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Derive the full frame for the current session state.
pub fn render_text(session: &Session) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("seekline - document search".to_string());
    lines.push(match &session.authenticated {
        Some(username) => format!("signed in as {username}"),
        None => "not signed in".to_string(),
    });
    lines.push(String::new());

    match session.page {
        Page::Home => home_lines(session, &mut lines),
        Page::Login => login_lines(session, &mut lines),
        Page::Signup => signup_lines(session, &mut lines),
    }

    if let Some(Modal::ForgotPassword) = session.modal {
        lines.push(String::new());
        lines.push("-- Reset password --".to_string());
        lines.push(format!("Email: {}_", session.reset_email));
        lines.push("Enter to send, Esc to cancel".to_string());
    }

    if let Some(message) = session.notifications.current() {
        lines.push(String::new());
        lines.push(format!("[{}] {}", message.severity.tag(), message.text));
    }

    lines.join("\n")
}

fn home_lines(session: &Session, lines: &mut Vec<String>) {
    lines.push(format!("Search: {}_", session.search.input));
    lines.push(String::new());

    match &session.search.outcome {
        SearchOutcome::Idle => {
            lines.push("Type a query and press Enter.".to_string());
        }
        SearchOutcome::Loading { query } => {
            lines.push(format!("Searching for \"{query}\"..."));
        }
        SearchOutcome::Results { query, hits } => {
            lines.push(format!("Found {} results for \"{query}\"", hits.len()));
            for (index, hit) in hits.iter().enumerate() {
                lines.push(format!(
                    "{:>3}. {}  (score {:.2})",
                    index + 1,
                    hit.doc_id,
                    hit.score
                ));
                if !hit.preview.is_empty() {
                    lines.push(format!("     {}", hit.preview));
                }
            }
        }
        SearchOutcome::Empty { query } => {
            lines.push("0 results".to_string());
            lines.push(format!("No results found for \"{query}\""));
        }
        SearchOutcome::Failed { reason } => {
            lines.push(format!("Search failed: {reason}"));
        }
    }

    lines.push(String::new());
    lines.push("Ctrl+L sign in, Ctrl+N create account, Ctrl+C quit".to_string());
}

fn focus_marker(focused: bool) -> &'static str {
    if focused {
        "> "
    } else {
        "  "
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn login_lines(session: &Session, lines: &mut Vec<String>) {
    let form = &session.login;
    lines.push("Sign in".to_string());
    lines.push(format!(
        "{}Username: {}",
        focus_marker(form.focus == LoginField::Username),
        form.username
    ));
    lines.push(format!(
        "{}Password: {}",
        focus_marker(form.focus == LoginField::Password),
        "*".repeat(form.password.chars().count())
    ));
    lines.push(format!(
        "{}{} Remember me",
        focus_marker(form.focus == LoginField::RememberMe),
        checkbox(form.remember_me)
    ));
    lines.push(String::new());
    lines.push("Enter to sign in, Ctrl+R forgot password, Ctrl+N create account".to_string());
}

fn affordance(state: FieldValidationState) -> String {
    match state {
        FieldValidationState::Untouched => String::new(),
        FieldValidationState::Valid => "  [ok]".to_string(),
        FieldValidationState::Invalid(reason) => format!("  [!] {reason}"),
    }
}

fn live_state(session: &Session, field: SignupField) -> FieldValidationState {
    let form = &session.signup;
    match field {
        SignupField::FirstName => validate::validate_name(&form.first_name),
        SignupField::LastName => validate::validate_name(&form.last_name),
        SignupField::Username => validate::validate_username(&form.username),
        SignupField::Email => validate::validate_email(&form.email),
        SignupField::ConfirmPassword => {
            validate::validate_confirmation(&form.password, &form.confirm_password)
        }
        // The password field shows the strength meter instead, and the
        // terms checkbox has no affordance.
        SignupField::Password | SignupField::Terms => FieldValidationState::Untouched,
    }
}

fn signup_lines(session: &Session, lines: &mut Vec<String>) {
    let form = &session.signup;
    lines.push("Create an account".to_string());

    for field in [
        SignupField::FirstName,
        SignupField::LastName,
        SignupField::Username,
        SignupField::Email,
    ] {
        let mut line = format!(
            "{}{}: {}{}",
            focus_marker(form.focus == field),
            field.label(),
            form.value(field),
            affordance(live_state(session, field)),
        );
        if field == SignupField::Username {
            match session.username_available {
                Some(true) => line.push_str("  (available)"),
                Some(false) => line.push_str("  (already taken)"),
                None => {}
            }
        }
        lines.push(line);
    }

    let score = password::score(&form.password);
    let tier = password::StrengthTier::from_score(score);
    lines.push(format!(
        "{}Password: {}",
        focus_marker(form.focus == SignupField::Password),
        "*".repeat(form.password.chars().count())
    ));
    if !form.password.is_empty() {
        lines.push(format!("    strength: {} ({score}/5)", tier.label()));
    }
    lines.push(format!(
        "{}Confirm password: {}{}",
        focus_marker(form.focus == SignupField::ConfirmPassword),
        "*".repeat(form.confirm_password.chars().count()),
        affordance(live_state(session, SignupField::ConfirmPassword)),
    ));
    lines.push(format!(
        "{}{} I accept the terms",
        focus_marker(form.focus == SignupField::Terms),
        checkbox(form.accept_terms)
    ));
    lines.push(String::new());
    lines.push("Enter to create account, Tab to move, Space to toggle".to_string());
}

/// Production renderer: alternate screen, raw mode, full-frame redraw.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> ViewRenderer for TerminalRenderer<W> {
    fn initialize(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(self.out, EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    fn render(&mut self, session: &Session) -> Result<()> {
        crossterm::queue!(self.out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
        for line in render_text(session).lines() {
            crossterm::queue!(self.out, Print(line), cursor::MoveToNextLine(1))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        crossterm::execute!(self.out, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}
