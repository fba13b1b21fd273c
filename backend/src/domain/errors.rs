//! Error types surfaced by the fee desk domain layer.
//!
//! Every variant is recoverable: the screen shows the message and keeps the
//! payment form open so the user can correct the input.
use shared::PaymentFormError;

/// Rejected payment input. The fee record is never modified when this is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentValidationError {
    #[error("Payment amount must be a finite number")]
    NonFiniteAmount,
    #[error("Payment amount must be greater than zero (got {0})")]
    NonPositiveAmount(f64),
    #[error("{message}")]
    InvalidForm {
        message: String,
        errors: Vec<PaymentFormError>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum FeeLedgerError {
    #[error(transparent)]
    Validation(#[from] PaymentValidationError),
    #[error("Fee record {0} was not found")]
    NotFound(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] shared::ParseEnumError),
    #[error("A payment for fee record {0} is already being processed")]
    SubmissionInProgress(String),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl FeeLedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FeeLedgerError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FeeLedgerError::NotFound(_))
    }
}
