//! Error handling for the SplitPay core
//!
//! Malformed numbers typed into a cell are not errors: they become draft or unset
//! cells. The variants below cover the remaining cases, which are all caller
//! mistakes (unknown ids, out-of-order wizard navigation) or a confirm attempted
//! before the allocation reconciles.

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Error type for allocation and wizard operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitPayError {
    /// An edit or commit named a participant that has no row
    #[error("Unknown participant: {participant_id}")]
    UnknownParticipant { participant_id: String },

    /// A selection named a contact that is not listed
    #[error("Unknown contact: {contact_id}")]
    UnknownContact { contact_id: String },

    /// Nothing to allocate
    #[error("Allocation has no participants")]
    NoParticipants,

    /// The total is zero or negative
    #[error("Total must be greater than zero, got {total}")]
    NonPositiveTotal { total: Decimal },

    /// Amounts or percents do not add up yet
    #[error(
        "Allocation is incomplete: {remaining_amount} remaining ({remaining_percent}% of the total)"
    )]
    Incomplete { remaining_amount: Decimal, remaining_percent: Decimal },

    /// A wizard action that the current step does not allow
    #[error("Step error: {message}")]
    Step { step: String, message: String },
}

impl SplitPayError {
    /// Get the error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            SplitPayError::UnknownParticipant { .. } | SplitPayError::UnknownContact { .. } => {
                ErrorCategory::NotFound
            }
            SplitPayError::NoParticipants
            | SplitPayError::NonPositiveTotal { .. }
            | SplitPayError::Incomplete { .. } => ErrorCategory::Allocation,
            SplitPayError::Step { .. } => ErrorCategory::Navigation,
        }
    }

    /// Whether further user input can clear the error.
    ///
    /// An incomplete allocation is fixed by editing cells or resetting to an equal
    /// split; the others need a different request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SplitPayError::Incomplete { .. } | SplitPayError::Step { .. })
    }

    /// Create a wizard step error
    pub fn step(step: impl fmt::Display, message: impl Into<String>) -> Self {
        Self::Step { step: step.to_string(), message: message.into() }
    }

    /// Create an unknown participant error
    pub fn unknown_participant(participant_id: &str) -> Self {
        Self::UnknownParticipant { participant_id: participant_id.to_string() }
    }
}

/// Broad error classes, used as a log field and by the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCategory {
    NotFound,
    Allocation,
    Navigation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::NotFound => write!(f, "not_found"),
            ErrorCategory::Allocation => write!(f, "allocation"),
            ErrorCategory::Navigation => write!(f, "navigation"),
        }
    }
}

/// Result type alias for core operations
pub type SplitPayResult<T> = Result<T, SplitPayError>;
