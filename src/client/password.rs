//! # Password Strength Evaluator
//!
//! Heuristic scoring over five independent criteria. This is a UX
//! affordance, not a security policy: the server applies its own rules.

/// Minimum score required to submit the signup form.
pub const SUBMIT_THRESHOLD: u8 = 3;

/// Score a password from 0 to 5, one point per criterion met:
/// length of at least 8, a lowercase letter, an uppercase letter,
/// a digit, and a symbol.
///
/// Total and idempotent; the empty string scores 0.
pub fn score(password: &str) -> u8 {
    let criteria = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    criteria.iter().filter(|met| **met).count() as u8
}

/// Ordered strength tiers derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthTier {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthTier::Weak,
            2 | 3 => StrengthTier::Fair,
            4 => StrengthTier::Good,
            _ => StrengthTier::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::Weak => "Weak",
            StrengthTier::Fair => "Fair",
            StrengthTier::Good => "Good",
            StrengthTier::Strong => "Strong",
        }
    }
}

/// True when the password meets the submission gate.
pub fn meets_submit_threshold(password: &str) -> bool {
    score(password) >= SUBMIT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_should_score_zero_and_weak() {
        assert_eq!(score(""), 0);
        assert_eq!(StrengthTier::from_score(0), StrengthTier::Weak);
    }

    #[test]
    fn score_should_stay_within_bounds() {
        let long = "x".repeat(200);
        for password in ["", "a", "aB3!", "abcdefgh", "Abcdef1!", long.as_str()] {
            assert!(score(password) <= 5);
        }
    }

    #[test]
    fn each_criterion_should_add_one_point() {
        assert_eq!(score("aaaa"), 1); // lowercase only
        assert_eq!(score("aaaA"), 2); // + uppercase
        assert_eq!(score("aaA1"), 3); // + digit
        assert_eq!(score("aA1!"), 4); // + symbol
        assert_eq!(score("aaaaA1!x"), 5); // + length
    }

    #[test]
    fn adding_a_missing_criterion_should_never_decrease_score() {
        let base = "abcdefgh"; // length + lowercase
        let with_upper = format!("{base}X");
        let with_digit = format!("{with_upper}7");
        let with_symbol = format!("{with_digit}!");

        let mut previous = score(base);
        for candidate in [with_upper.as_str(), with_digit.as_str(), with_symbol.as_str()] {
            let next = score(candidate);
            assert!(next >= previous, "score regressed for {candidate:?}");
            previous = next;
        }
    }

    #[test]
    fn tiers_should_map_score_ranges() {
        assert_eq!(StrengthTier::from_score(1), StrengthTier::Weak);
        assert_eq!(StrengthTier::from_score(2), StrengthTier::Fair);
        assert_eq!(StrengthTier::from_score(3), StrengthTier::Fair);
        assert_eq!(StrengthTier::from_score(4), StrengthTier::Good);
        assert_eq!(StrengthTier::from_score(5), StrengthTier::Strong);
    }

    #[test]
    fn submission_gate_should_require_score_of_three() {
        assert!(!meets_submit_threshold("aaaA"));
        assert!(meets_submit_threshold("aaA1"));
        assert!(meets_submit_threshold("Str0ng!pass"));
    }
}
