//! Form rules for the sign-in and sign-up screens.
//!
//! Every rule is checked and all failures are reported together, one message per
//! failing rule, so a form can show them next to their fields.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{AuthError, AuthResult, FieldError};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    /// Email or username
    pub identifier: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> AuthResult<()> {
        let mut errors = Vec::new();
        if self.identifier.trim().is_empty() {
            errors.push(FieldError::new("identifier", "Identifier is required"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub terms: bool,
}

impl SignUpForm {
    pub fn validate(&self) -> AuthResult<()> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("first_name", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("last_name", "Last name is required"));
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !EMAIL.is_match(self.email.trim()) {
            errors.push(FieldError::new("email", "Invalid email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("Password should be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if !self.terms {
            errors.push(FieldError::new("terms", "You must accept the terms and conditions"));
        }
        into_result(errors)
    }
}

fn into_result(errors: Vec<FieldError>) -> AuthResult<()> {
    if errors.is_empty() { Ok(()) } else { Err(AuthError::Validation(errors)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_sign_up() -> SignUpForm {
        SignUpForm {
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            terms: true,
        }
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let err = SignInForm::default().validate().unwrap_err();
        assert_eq!(err.field_messages("identifier"), vec!["Identifier is required"]);
        assert_eq!(err.field_messages("password"), vec!["Password is required"]);

        let form = SignInForm { identifier: "ana".to_string(), password: "x".to_string() };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn sign_up_accepts_valid_form() {
        assert!(valid_sign_up().validate().is_ok());
    }

    #[test]
    fn sign_up_reports_each_rule() {
        let form = SignUpForm {
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            terms: false,
            ..valid_sign_up()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field_messages("email"), vec!["Invalid email"]);
        assert_eq!(
            err.field_messages("password"),
            vec!["Password should be at least 6 characters"]
        );
        assert_eq!(
            err.field_messages("terms"),
            vec!["You must accept the terms and conditions"]
        );
        assert!(err.field_messages("first_name").is_empty());
    }

    #[test]
    fn blank_names_are_rejected() {
        let form = SignUpForm { first_name: "  ".to_string(), ..valid_sign_up() };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field_messages("first_name"), vec!["First name is required"]);
    }
}
