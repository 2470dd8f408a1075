//! # Auth Controller
//!
//! Orchestrates the signup, login and password-reset flows, plus the
//! advisory debounced username-availability check. Validation failures
//! are resolved locally and never reach the network.

use std::time::Duration;

use serde_json::{json, Value};

use crate::client::events::{Effect, Flow, TimerKind};
use crate::client::models::{Page, Session, Severity, SignupField};
use crate::client::services::gateway::{
    CHECK_USERNAME_ENDPOINT, FORGOT_PASSWORD_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT,
    SIGNUP_ENDPOINT,
};
use crate::client::services::{DraftField, GatewayError, GatewayResult};
use crate::client::validate;

/// Pause before navigating to the login page after a successful signup.
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Pause before the password-reset modal closes itself.
pub const RESET_MODAL_DELAY: Duration = Duration::from_secs(2);

/// Quiet period after the last username keystroke before the
/// availability check fires.
pub const USERNAME_DEBOUNCE_QUIET: Duration = Duration::from_millis(500);

fn draft_field_for(field: SignupField) -> Option<DraftField> {
    match field {
        SignupField::FirstName => Some(DraftField::FirstName),
        SignupField::LastName => Some(DraftField::LastName),
        SignupField::Username => Some(DraftField::Username),
        SignupField::Email => Some(DraftField::Email),
        // Passwords and the terms checkbox are never persisted.
        SignupField::Password | SignupField::ConfirmPassword | SignupField::Terms => None,
    }
}

/// React to a keystroke in a signup field: persist the draft for
/// whitelisted fields and reschedule the availability check when the
/// username changed.
pub fn signup_field_edited(session: &mut Session, field: SignupField) -> Vec<Effect> {
    if let Some(draft_field) = draft_field_for(field) {
        let value = session.signup.value(field).to_string();
        session.drafts.set(draft_field, &value);
    }

    if field == SignupField::Username {
        session.username_available = None;
        return vec![session.schedule(TimerKind::UsernameDebounce, USERNAME_DEBOUNCE_QUIET)];
    }
    Vec::new()
}

/// Fire the debounced username-availability check, if the username is
/// currently worth checking.
pub fn username_check_due(session: &Session) -> Vec<Effect> {
    if session.page != Page::Signup {
        return Vec::new();
    }
    let username = session.signup.username.trim();
    if !validate::validate_username(username).is_valid() {
        return Vec::new();
    }
    vec![Effect::Post {
        flow: Flow::UsernameCheck,
        path: CHECK_USERNAME_ENDPOINT,
        body: json!({ "username": username }),
    }]
}

/// Apply a settled availability check. Advisory only: failures are
/// logged and otherwise ignored, never surfaced to the user.
pub fn settle_username_check(session: &mut Session, result: GatewayResult) -> Vec<Effect> {
    match result {
        Ok(body) => {
            session.username_available = body.get("available").and_then(Value::as_bool);
        }
        Err(error) => {
            tracing::debug!("username availability check failed: {error}");
        }
    }
    Vec::new()
}

/// Submit the signup form.
///
/// Validation short-circuits before any network traffic. On dispatch
/// the draft scope is cleared synchronously, independent of the
/// request outcome.
pub fn submit_signup(session: &mut Session) -> Vec<Effect> {
    if session.in_flight(Flow::Signup) {
        return Vec::new();
    }

    if let Err(message) = validate::validate_signup(&session.signup) {
        return vec![session.notify(message, Severity::Error)];
    }

    session.set_in_flight(Flow::Signup, true);
    session.drafts.clear_all();

    let form = &session.signup;
    let body = json!({
        "username": form.username.trim(),
        "email": form.email.trim(),
        "password": form.password,
        "firstName": form.first_name.trim(),
        "lastName": form.last_name.trim(),
    });

    vec![Effect::Post {
        flow: Flow::Signup,
        path: SIGNUP_ENDPOINT,
        body,
    }]
}

/// Apply a settled signup request. The submit control is re-enabled by
/// the unconditional flag clear, whatever the outcome.
pub fn settle_signup(session: &mut Session, result: GatewayResult) -> Vec<Effect> {
    session.set_in_flight(Flow::Signup, false);

    match result {
        // A success status with an unparsable body still created the
        // account; degrade to the fallback message.
        Ok(_) | Err(GatewayError::MalformedResponse) => {
            let message = match &result {
                Ok(body) => body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Registration successful!")
                    .to_string(),
                Err(_) => "Registration successful!".to_string(),
            };
            tracing::info!("signup succeeded");
            vec![
                session.notify(message, Severity::Success),
                session.schedule(TimerKind::SignupRedirect, SIGNUP_REDIRECT_DELAY),
            ]
        }
        Err(error) => {
            let message = error.user_message("Registration failed. Please try again.");
            vec![session.notify(message, Severity::Error)]
        }
    }
}

/// Submit the login form. Only non-emptiness is checked client-side.
pub fn submit_login(session: &mut Session) -> Vec<Effect> {
    if session.in_flight(Flow::Login) {
        return Vec::new();
    }

    if let Err(message) = validate::validate_login(&session.login.username, &session.login.password)
    {
        return vec![session.notify(message, Severity::Error)];
    }

    session.set_in_flight(Flow::Login, true);
    let body = json!({
        "username": session.login.username.trim(),
        "password": session.login.password,
    });

    vec![Effect::Post {
        flow: Flow::Login,
        path: LOGIN_ENDPOINT,
        body,
    }]
}

/// Apply a settled login request.
///
/// On success the remembered identity is set or cleared per the
/// toggle's value at submit time, never left stale from an earlier
/// session with a different choice.
pub fn settle_login(session: &mut Session, result: GatewayResult) -> Vec<Effect> {
    session.set_in_flight(Flow::Login, false);

    match result {
        // A 2xx with an unparsable body still set the session cookie;
        // treat it as a degraded success.
        Ok(_) | Err(GatewayError::MalformedResponse) => {
            let username = session.login.username.trim().to_string();

            if session.login.remember_me {
                if let Err(error) = session.identity.remember(&username) {
                    tracing::warn!("failed to persist remembered identity: {error}");
                }
            } else if let Err(error) = session.identity.forget() {
                tracing::warn!("failed to clear remembered identity: {error}");
            }

            tracing::info!("logged in as {username}");
            session.authenticated = Some(username.clone());
            session.login.password.clear();
            session.enter_home();
            vec![session.notify(format!("Welcome back, {username}!"), Severity::Success)]
        }
        Err(error) => {
            let message = error.user_message("Invalid credentials");
            vec![session.notify(message, Severity::Error)]
        }
    }
}

/// Submit the password-reset request. Requires a non-empty email; no
/// format validation beyond that.
pub fn submit_reset(session: &mut Session) -> Vec<Effect> {
    if session.in_flight(Flow::PasswordReset) {
        return Vec::new();
    }

    let email = session.reset_email.trim().to_string();
    if email.is_empty() {
        return vec![session.notify("Please enter your email address", Severity::Error)];
    }

    session.set_in_flight(Flow::PasswordReset, true);
    vec![Effect::Post {
        flow: Flow::PasswordReset,
        path: FORGOT_PASSWORD_ENDPOINT,
        body: json!({ "email": email }),
    }]
}

/// Apply a settled password-reset request.
///
/// Every outcome, including transport failures, maps to the same
/// confirmation so responses never reveal whether an account exists.
/// The modal closes itself after a fixed delay.
pub fn settle_reset(session: &mut Session, result: GatewayResult) -> Vec<Effect> {
    session.set_in_flight(Flow::PasswordReset, false);

    if let Err(error) = result {
        tracing::debug!("password reset request failed (masked): {error}");
    }

    vec![
        session.notify(
            "If that email exists, password reset instructions have been sent",
            Severity::Success,
        ),
        session.schedule(TimerKind::ResetModalClose, RESET_MODAL_DELAY),
    ]
}

/// Start a logout. No-op when not signed in.
pub fn logout(session: &mut Session) -> Vec<Effect> {
    if session.authenticated.is_none() {
        return Vec::new();
    }
    vec![Effect::Post {
        flow: Flow::Logout,
        path: LOGOUT_ENDPOINT,
        body: json!({}),
    }]
}

/// Apply a settled logout. Local state is cleared even when the server
/// call failed.
pub fn settle_logout(session: &mut Session, result: GatewayResult) -> Vec<Effect> {
    if let Err(error) = result {
        tracing::debug!("logout request failed, clearing local state anyway: {error}");
    }
    session.authenticated = None;
    vec![session.notify("Signed out", Severity::Info)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Modal, Page};
    use crate::client::services::{MemoryDraftStore, MemoryIdentityStore};

    fn session() -> Session {
        Session::new(
            Box::new(MemoryDraftStore::new()),
            Box::new(MemoryIdentityStore::new()),
        )
    }

    fn fill_valid_signup(session: &mut Session) {
        session.signup.first_name = "Ada".into();
        session.signup.last_name = "Lovelace".into();
        session.signup.username = "ada_l".into();
        session.signup.email = "ada@example.com".into();
        session.signup.password = "Str0ng!pass".into();
        session.signup.confirm_password = "Str0ng!pass".into();
        session.signup.accept_terms = true;
    }

    #[test]
    fn invalid_signup_shows_one_message_and_stays_local() {
        let mut session = session();
        fill_valid_signup(&mut session);
        session.signup.email = "broken".into();
        session.signup.confirm_password = "different".into();

        let effects = submit_signup(&mut session);

        assert!(effects.iter().all(|effect| !effect.is_post()));
        let message = session.notifications.current().unwrap();
        assert!(message.text.contains("email"), "got: {}", message.text);
    }

    #[test]
    fn signup_dispatch_clears_drafts_before_the_outcome_is_known() {
        let mut session = session();
        fill_valid_signup(&mut session);
        session.drafts.set(DraftField::FirstName, "Ada");

        let effects = submit_signup(&mut session);

        assert_eq!(effects.iter().filter(|e| e.is_post()).count(), 1);
        // Cleared on dispatch even though nothing settled yet.
        assert!(session.drafts.get_all().is_empty());
        assert!(session.in_flight(Flow::Signup));
    }

    #[test]
    fn signup_success_uses_server_message_and_schedules_redirect() {
        let mut session = session();
        fill_valid_signup(&mut session);
        submit_signup(&mut session);

        let effects = settle_signup(&mut session, Ok(json!({ "message": "Welcome aboard!" })));

        assert!(!session.in_flight(Flow::Signup));
        assert_eq!(
            session.notifications.current().unwrap().text,
            "Welcome aboard!"
        );
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Schedule {
                kind: TimerKind::SignupRedirect,
                ..
            }
        )));
    }

    #[test]
    fn signup_failure_reenables_the_submit_control() {
        let mut session = session();
        fill_valid_signup(&mut session);
        submit_signup(&mut session);

        settle_signup(
            &mut session,
            Err(GatewayError::Http {
                status: 400,
                server_message: Some("Username already exists".into()),
            }),
        );

        assert!(!session.in_flight(Flow::Signup));
        assert_eq!(
            session.notifications.current().unwrap().text,
            "Username already exists"
        );
        // Submittable again.
        assert_eq!(
            submit_signup(&mut session)
                .iter()
                .filter(|e| e.is_post())
                .count(),
            1
        );
    }

    #[test]
    fn login_with_remember_me_persists_the_username() {
        let mut session = session();
        session.login.username = "ada_l".into();
        session.login.password = "secret".into();
        session.login.remember_me = true;
        submit_login(&mut session);

        settle_login(&mut session, Ok(json!({ "message": "Login successful!" })));

        assert_eq!(session.identity.recall().as_deref(), Some("ada_l"));
        assert_eq!(session.authenticated.as_deref(), Some("ada_l"));
        assert_eq!(session.page, Page::Home);
        assert_eq!(session.login.password, "");
    }

    #[test]
    fn login_with_toggle_off_clears_a_previously_remembered_identity() {
        let mut session = session();
        session.identity.remember("old_name").unwrap();
        session.login.username = "ada_l".into();
        session.login.password = "secret".into();
        session.login.remember_me = false;
        submit_login(&mut session);

        settle_login(&mut session, Ok(json!({})));

        assert_eq!(session.identity.recall(), None);
    }

    #[test]
    fn login_transport_failure_gets_a_connectivity_message() {
        let mut session = session();
        session.login.username = "ada_l".into();
        session.login.password = "secret".into();
        submit_login(&mut session);

        settle_login(
            &mut session,
            Err(GatewayError::Transport("refused".into())),
        );

        let message = session.notifications.current().unwrap();
        assert!(message.text.contains("connect"), "got: {}", message.text);
        assert_eq!(session.authenticated, None);
    }

    #[test]
    fn login_rejection_surfaces_the_server_text() {
        let mut session = session();
        session.login.username = "ada_l".into();
        session.login.password = "wrong".into();
        submit_login(&mut session);

        settle_login(
            &mut session,
            Err(GatewayError::Http {
                status: 401,
                server_message: Some("Invalid credentials".into()),
            }),
        );

        assert_eq!(
            session.notifications.current().unwrap().text,
            "Invalid credentials"
        );
    }

    #[test]
    fn empty_login_fields_never_reach_the_network() {
        let mut session = session();
        let effects = submit_login(&mut session);
        assert!(effects.iter().all(|effect| !effect.is_post()));
    }

    #[test]
    fn reset_masks_every_outcome_as_success() {
        let mut session = session();
        session.open_reset_modal();
        session.reset_email = "ada@example.com".into();
        submit_reset(&mut session);

        let effects = settle_reset(
            &mut session,
            Err(GatewayError::Transport("network down".into())),
        );

        let message = session.notifications.current().unwrap();
        assert_eq!(message.severity, Severity::Success);
        assert!(message.text.contains("If that email exists"));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Schedule {
                kind: TimerKind::ResetModalClose,
                ..
            }
        )));
        assert_eq!(session.modal, Some(Modal::ForgotPassword));
    }

    #[test]
    fn reset_requires_a_non_empty_email() {
        let mut session = session();
        session.open_reset_modal();
        let effects = submit_reset(&mut session);
        assert!(effects.iter().all(|effect| !effect.is_post()));
        assert_eq!(
            session.notifications.current().unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn username_keystrokes_reschedule_the_availability_check() {
        let mut session = session();
        session.enter_signup();

        session.signup.username = "a".into();
        let first = signup_field_edited(&mut session, SignupField::Username);
        session.signup.username = "ad".into();
        let second = signup_field_edited(&mut session, SignupField::Username);
        session.signup.username = "ada".into();
        let third = signup_field_edited(&mut session, SignupField::Username);

        let generation_of = |effects: &[Effect]| match effects {
            [Effect::Schedule { generation, .. }] => *generation,
            other => panic!("unexpected effects: {other:?}"),
        };

        // Only the last scheduled generation is still current.
        assert!(!session.timer_current(TimerKind::UsernameDebounce, generation_of(&first)));
        assert!(!session.timer_current(TimerKind::UsernameDebounce, generation_of(&second)));
        assert!(session.timer_current(TimerKind::UsernameDebounce, generation_of(&third)));
    }

    #[test]
    fn due_check_only_fires_for_a_plausible_username() {
        let mut session = session();
        session.enter_signup();

        session.signup.username = "ab".into();
        assert!(username_check_due(&session).is_empty());

        session.signup.username = "ada_l".into();
        let effects = username_check_due(&session);
        assert_eq!(effects.len(), 1);
        assert!(effects[0].is_post());
    }

    #[test]
    fn settle_availability_records_the_flag_and_swallows_errors() {
        let mut session = session();
        settle_username_check(&mut session, Ok(json!({ "available": false })));
        assert_eq!(session.username_available, Some(false));

        settle_username_check(&mut session, Err(GatewayError::MalformedResponse));
        assert_eq!(session.username_available, Some(false));
        assert!(session.notifications.current().is_none());
    }

    #[test]
    fn drafts_record_keystrokes_but_never_passwords() {
        let mut session = session();
        session.enter_signup();

        session.signup.first_name = "A".into();
        signup_field_edited(&mut session, SignupField::FirstName);
        session.signup.first_name = "Ad".into();
        signup_field_edited(&mut session, SignupField::FirstName);
        session.signup.password = "hunter2".into();
        signup_field_edited(&mut session, SignupField::Password);

        assert_eq!(
            session.drafts.get(DraftField::FirstName).as_deref(),
            Some("Ad")
        );
        let stored: Vec<String> = session
            .drafts
            .get_all()
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        assert!(!stored.iter().any(|value| value.contains("hunter2")));
    }

    #[test]
    fn logout_clears_local_state_even_on_failure() {
        let mut session = session();
        session.authenticated = Some("ada_l".into());

        let effects = logout(&mut session);
        assert_eq!(effects.len(), 1);

        settle_logout(
            &mut session,
            Err(GatewayError::Transport("gone".into())),
        );
        assert_eq!(session.authenticated, None);
    }
}
