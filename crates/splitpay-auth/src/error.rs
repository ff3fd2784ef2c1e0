//! Error kinds at the auth boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validation message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The form was rejected before any request was sent
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Credentials or tokens were refused
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The auth API answered with an error status
    #[error("Auth service error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The auth API could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The auth API answered with an unexpected body
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl AuthError {
    /// Messages for a single field, empty when the field passed validation.
    pub fn field_messages(&self, field: &str) -> Vec<&str> {
        match self {
            AuthError::Validation(errors) => errors
                .iter()
                .filter(|e| e.field == field)
                .map(|e| e.message.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a session check should fall back to refreshing the tokens.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AuthError::Unauthorized(_) | AuthError::Server { .. })
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join(", ")
}

pub type AuthResult<T> = Result<T, AuthError>;
