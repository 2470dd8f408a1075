//! # Validation Engine
//!
//! Pure predicate functions mapping raw field values to a
//! [`FieldValidationState`]. The same predicates back both the
//! per-keystroke affordances and the submit-time check; only the
//! latter gates a network call.

use std::sync::OnceLock;

use regex::Regex;

use crate::client::models::{FieldValidationState, SignupForm};
use crate::client::password;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name pattern"))
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid username pattern"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

/// Letters and spaces only, at least 2 characters.
pub fn validate_name(value: &str) -> FieldValidationState {
    let value = value.trim();
    if value.is_empty() {
        return FieldValidationState::Untouched;
    }
    if value.chars().count() >= 2 && name_pattern().is_match(value) {
        FieldValidationState::Valid
    } else {
        FieldValidationState::Invalid("use letters only, at least 2 characters".to_string())
    }
}

/// Letters, digits and underscore, at least 3 characters.
pub fn validate_username(value: &str) -> FieldValidationState {
    let value = value.trim();
    if value.is_empty() {
        return FieldValidationState::Untouched;
    }
    if value.chars().count() >= 3 && username_pattern().is_match(value) {
        FieldValidationState::Valid
    } else {
        FieldValidationState::Invalid(
            "use letters, digits or underscore, at least 3 characters".to_string(),
        )
    }
}

/// Syntactic email check only; no DNS or mailbox verification.
pub fn validate_email(value: &str) -> FieldValidationState {
    let value = value.trim();
    if value.is_empty() {
        return FieldValidationState::Untouched;
    }
    if email_pattern().is_match(value) {
        FieldValidationState::Valid
    } else {
        FieldValidationState::Invalid("enter a valid email address".to_string())
    }
}

/// Valid only when both passwords are non-empty and equal; Untouched
/// while the confirmation field is still empty.
pub fn validate_confirmation(password: &str, confirmation: &str) -> FieldValidationState {
    if confirmation.is_empty() {
        return FieldValidationState::Untouched;
    }
    if !password.is_empty() && password == confirmation {
        FieldValidationState::Valid
    } else {
        FieldValidationState::Invalid("passwords do not match".to_string())
    }
}

/// Submit-time validation of the whole signup form.
///
/// Rules run in a fixed priority order and short-circuit: the first
/// failure becomes the single user-visible message, so the user always
/// gets one actionable instruction rather than a list.
pub fn validate_signup(form: &SignupForm) -> Result<(), String> {
    if !validate_name(&form.first_name).is_valid() {
        return Err("Please enter a valid first name (letters only, at least 2 characters)".into());
    }
    if !validate_name(&form.last_name).is_valid() {
        return Err("Please enter a valid last name (letters only, at least 2 characters)".into());
    }
    if !validate_username(&form.username).is_valid() {
        return Err(
            "Username must be at least 3 characters (letters, digits or underscore)".into(),
        );
    }
    if !validate_email(&form.email).is_valid() {
        return Err("Please enter a valid email address".into());
    }
    if !password::meets_submit_threshold(&form.password) {
        return Err("Password is too weak: mix upper and lower case, digits and symbols".into());
    }
    if !validate_confirmation(&form.password, &form.confirm_password).is_valid() {
        return Err("Passwords do not match".into());
    }
    if !form.accept_terms {
        return Err("Please accept the terms to continue".into());
    }
    Ok(())
}

/// Login requires both fields non-empty; no further format checks.
pub fn validate_login(username: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() || password.is_empty() {
        return Err("Please enter username and password".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            username: "ada_l".into(),
            email: "ada@example.com".into(),
            password: "Str0ng!pass".into(),
            confirm_password: "Str0ng!pass".into(),
            accept_terms: true,
            ..Default::default()
        }
    }

    #[test]
    fn name_should_require_two_letters() {
        assert_eq!(validate_name(""), FieldValidationState::Untouched);
        assert!(matches!(
            validate_name("A"),
            FieldValidationState::Invalid(_)
        ));
        assert!(matches!(
            validate_name("Ada 99"),
            FieldValidationState::Invalid(_)
        ));
        assert_eq!(validate_name("Ada"), FieldValidationState::Valid);
        assert_eq!(validate_name("Mary Jane"), FieldValidationState::Valid);
    }

    #[test]
    fn username_should_reject_punctuation() {
        assert_eq!(validate_username(""), FieldValidationState::Untouched);
        assert!(matches!(
            validate_username("ab"),
            FieldValidationState::Invalid(_)
        ));
        assert!(matches!(
            validate_username("ada!"),
            FieldValidationState::Invalid(_)
        ));
        assert_eq!(validate_username("ada_l"), FieldValidationState::Valid);
    }

    #[test]
    fn email_check_is_syntactic_only() {
        assert_eq!(validate_email(""), FieldValidationState::Untouched);
        assert!(matches!(
            validate_email("not-an-email"),
            FieldValidationState::Invalid(_)
        ));
        assert!(matches!(
            validate_email("a@b"),
            FieldValidationState::Invalid(_)
        ));
        assert_eq!(validate_email("a@b.co"), FieldValidationState::Valid);
    }

    #[test]
    fn confirmation_is_untouched_while_empty() {
        assert_eq!(
            validate_confirmation("secret", ""),
            FieldValidationState::Untouched
        );
        assert!(matches!(
            validate_confirmation("secret", "secrets"),
            FieldValidationState::Invalid(_)
        ));
        assert!(matches!(
            validate_confirmation("", ""),
            FieldValidationState::Untouched
        ));
        assert_eq!(
            validate_confirmation("secret", "secret"),
            FieldValidationState::Valid
        );
    }

    #[test]
    fn signup_validation_should_accept_a_valid_form() {
        assert!(validate_signup(&valid_form()).is_ok());
    }

    #[test]
    fn signup_validation_should_short_circuit_on_first_failure() {
        // Both the email and the confirmation are wrong; only the email
        // error is reported because it comes first in priority order.
        let mut form = valid_form();
        form.email = "broken".into();
        form.confirm_password = "different".into();

        let message = validate_signup(&form).unwrap_err();
        assert!(message.contains("email"), "got: {message}");
    }

    #[test]
    fn signup_validation_should_require_terms_last() {
        let mut form = valid_form();
        form.accept_terms = false;
        let message = validate_signup(&form).unwrap_err();
        assert!(message.contains("terms"), "got: {message}");
    }

    #[test]
    fn signup_validation_should_gate_on_password_strength() {
        let mut form = valid_form();
        form.password = "weak".into();
        form.confirm_password = "weak".into();
        let message = validate_signup(&form).unwrap_err();
        assert!(message.contains("weak"), "got: {message}");
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("user", "").is_err());
        assert!(validate_login("   ", "x").is_err());
        assert!(validate_login("user", "x").is_ok());
    }
}
