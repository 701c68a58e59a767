//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::{AmountError, TxHash};

/// Domain-specific errors
///
/// These represent invalid input and broken state-machine invariants.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid amount (zero, negative, too precise, or out of range)
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Submission lifecycle moved along an edge that does not exist
    #[error("Invalid submission transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Confirmation arrived for a different transaction than the one submitted
    #[error("Receipt mismatch: expected {expected}, found {found}")]
    ReceiptMismatch { expected: TxHash, found: TxHash },
}

impl DomainError {
    pub fn invalid_transition(from: &'static str, to: &'static str) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Check if this is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }
}
