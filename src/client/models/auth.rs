//! # Account Models
//!
//! Form state and per-field validation affordances for the login,
//! signup and password-reset surfaces.

/// Visual validation affordance for a single form field.
///
/// Advisory only: it toggles a visual mark per keystroke and never
/// blocks typing. Only the submit-time check gates a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationState {
    Untouched,
    Invalid(String),
    Valid,
}

impl FieldValidationState {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldValidationState::Valid)
    }
}

/// Fields of the signup form, listed in submit-validation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignupField {
    #[default]
    FirstName,
    LastName,
    Username,
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

impl SignupField {
    pub const ORDER: [SignupField; 7] = [
        SignupField::FirstName,
        SignupField::LastName,
        SignupField::Username,
        SignupField::Email,
        SignupField::Password,
        SignupField::ConfirmPassword,
        SignupField::Terms,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SignupField::FirstName => "First name",
            SignupField::LastName => "Last name",
            SignupField::Username => "Username",
            SignupField::Email => "Email",
            SignupField::Password => "Password",
            SignupField::ConfirmPassword => "Confirm password",
            SignupField::Terms => "I accept the terms",
        }
    }
}

/// State of the signup form.
#[derive(Debug, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
    pub focus: SignupField,
}

impl SignupForm {
    /// Current text of a field. The terms checkbox has no text.
    pub fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::FirstName => &self.first_name,
            SignupField::LastName => &self.last_name,
            SignupField::Username => &self.username,
            SignupField::Email => &self.email,
            SignupField::Password => &self.password,
            SignupField::ConfirmPassword => &self.confirm_password,
            SignupField::Terms => "",
        }
    }

    /// Mutable text of a field, `None` for the terms checkbox.
    pub fn value_mut(&mut self, field: SignupField) -> Option<&mut String> {
        match field {
            SignupField::FirstName => Some(&mut self.first_name),
            SignupField::LastName => Some(&mut self.last_name),
            SignupField::Username => Some(&mut self.username),
            SignupField::Email => Some(&mut self.email),
            SignupField::Password => Some(&mut self.password),
            SignupField::ConfirmPassword => Some(&mut self.confirm_password),
            SignupField::Terms => None,
        }
    }

    pub fn focus_next(&mut self) {
        let index = Self::position(self.focus);
        self.focus = SignupField::ORDER[(index + 1) % SignupField::ORDER.len()];
    }

    pub fn focus_previous(&mut self) {
        let index = Self::position(self.focus);
        let len = SignupField::ORDER.len();
        self.focus = SignupField::ORDER[(index + len - 1) % len];
    }

    fn position(field: SignupField) -> usize {
        SignupField::ORDER
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0)
    }
}

/// Fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    RememberMe,
}

/// State of the login form.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::RememberMe,
            LoginField::RememberMe => LoginField::Username,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::RememberMe,
            LoginField::Password => LoginField::Username,
            LoginField::RememberMe => LoginField::Password,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_focus_should_cycle_through_all_fields() {
        let mut form = SignupForm::default();
        assert_eq!(form.focus, SignupField::FirstName);

        for expected in SignupField::ORDER.iter().skip(1) {
            form.focus_next();
            assert_eq!(form.focus, *expected);
        }
        form.focus_next();
        assert_eq!(form.focus, SignupField::FirstName);
    }

    #[test]
    fn signup_focus_previous_should_wrap() {
        let mut form = SignupForm::default();
        form.focus_previous();
        assert_eq!(form.focus, SignupField::Terms);
    }

    #[test]
    fn signup_form_should_expose_field_values() {
        let mut form = SignupForm::default();
        *form.value_mut(SignupField::Email).unwrap() = "a@b.co".to_string();
        assert_eq!(form.value(SignupField::Email), "a@b.co");
        assert!(form.value_mut(SignupField::Terms).is_none());
    }

    #[test]
    fn login_focus_should_cycle() {
        let mut form = LoginForm::default();
        form.focus_next();
        assert_eq!(form.focus, LoginField::Password);
        form.focus_next();
        assert_eq!(form.focus, LoginField::RememberMe);
        form.focus_next();
        assert_eq!(form.focus, LoginField::Username);
    }
}
