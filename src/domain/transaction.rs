//! Transaction lifecycle
//!
//! The two state-changing operations a user can trigger, the receipt that
//! confirms one of them, and the submission state machine:
//!
//! ```text
//! Idle -> Submitted -> Confirmed
//! Idle -> Rejected
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, EtherAmount, TxHash, Wei};

/// A state-changing call against the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Payable `fund()` carrying the amount as call value
    Deposit { amount: EtherAmount },
    /// `withdraw()`, no arguments
    Withdraw,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Deposit { .. } => OperationKind::Deposit,
            Operation::Withdraw => OperationKind::Withdraw,
        }
    }

    /// Value attached to the call
    pub fn value(&self) -> Wei {
        match self {
            Operation::Deposit { amount } => amount.to_wei(),
            Operation::Withdraw => Wei::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Deposit,
    Withdraw,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Reverted,
}

/// Inclusion notice for a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    pub confirmations: u64,
    pub status: ExecutionStatus,
}

impl TxReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}

/// Where a single submission currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitted { tx_hash: TxHash },
    Confirmed { receipt: TxReceipt },
    Rejected { reason: String },
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "Idle",
            SubmissionState::Submitted { .. } => "Submitted",
            SubmissionState::Confirmed { .. } => "Confirmed",
            SubmissionState::Rejected { .. } => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Confirmed { .. } | SubmissionState::Rejected { .. }
        )
    }

    /// The agent accepted the request and handed back a transaction hash.
    pub fn submit(self, tx_hash: TxHash) -> Result<Self, DomainError> {
        match self {
            SubmissionState::Idle => Ok(SubmissionState::Submitted { tx_hash }),
            other => Err(DomainError::invalid_transition(other.name(), "Submitted")),
        }
    }

    /// The agent or node refused the request.
    pub fn reject(self, reason: impl Into<String>) -> Result<Self, DomainError> {
        match self {
            SubmissionState::Idle => Ok(SubmissionState::Rejected {
                reason: reason.into(),
            }),
            other => Err(DomainError::invalid_transition(other.name(), "Rejected")),
        }
    }

    /// A receipt for the submitted hash arrived.
    pub fn confirm(self, receipt: TxReceipt) -> Result<Self, DomainError> {
        match self {
            SubmissionState::Submitted { tx_hash } if tx_hash == receipt.transaction_hash => {
                Ok(SubmissionState::Confirmed { receipt })
            }
            SubmissionState::Submitted { tx_hash } => Err(DomainError::ReceiptMismatch {
                expected: tx_hash,
                found: receipt.transaction_hash,
            }),
            other => Err(DomainError::invalid_transition(other.name(), "Confirmed")),
        }
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            SubmissionState::Submitted { tx_hash } => Some(*tx_hash),
            SubmissionState::Confirmed { receipt } => Some(receipt.transaction_hash),
            _ => None,
        }
    }
}
