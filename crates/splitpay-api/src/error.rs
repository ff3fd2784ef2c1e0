//! Error handling for the SplitPay API
//!
//! Every failure a handler can produce maps to one HTTP status and one stable
//! error code, and is rendered as an [`ApiErrorResponse`] body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use splitpay_core::SplitPayError;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request data (400 Bad Request)
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Wizard action not allowed on the current step (400 Bad Request)
    #[error("{message}")]
    Step { step: String, message: String },

    /// Unknown session, participant or contact (404 Not Found)
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The allocation does not reconcile yet (409 Conflict)
    #[error("{message}")]
    Incomplete { message: String, details: serde_json::Value },

    /// Session capacity reached (503 Service Unavailable)
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Internal server errors (500 Internal Server Error)
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::Step { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Incomplete { .. } => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Step { .. } => "STEP_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Incomplete { .. } => "ALLOCATION_INCOMPLETE",
            ApiError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ApiErrorResponse {
        let details = match self {
            ApiError::Validation { field: Some(field), .. } => Some(json!({ "field": field })),
            ApiError::Step { step, .. } => Some(json!({ "step": step })),
            ApiError::Incomplete { details, .. } => Some(details.clone()),
            _ => None,
        };

        ApiErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details,
            timestamp: Utc::now(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    pub fn session_not_found(id: Uuid) -> Self {
        Self::not_found(format!("session {id}"))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(code = self.error_code(), error = %self, "Request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<SplitPayError> for ApiError {
    fn from(err: SplitPayError) -> Self {
        match err {
            SplitPayError::UnknownParticipant { participant_id } => {
                ApiError::not_found(format!("participant {participant_id}"))
            }
            SplitPayError::UnknownContact { contact_id } => {
                ApiError::not_found(format!("contact {contact_id}"))
            }
            SplitPayError::Step { step, message } => ApiError::Step { step, message },
            SplitPayError::Incomplete { remaining_amount, remaining_percent } => {
                let message = SplitPayError::Incomplete { remaining_amount, remaining_percent }
                    .to_string();
                ApiError::Incomplete {
                    message,
                    details: json!({
                        "remainingAmount": remaining_amount,
                        "remainingPercent": remaining_percent,
                    }),
                }
            }
            err @ (SplitPayError::NoParticipants | SplitPayError::NonPositiveTotal { .. }) => {
                ApiError::validation(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
