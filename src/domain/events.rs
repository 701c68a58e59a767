//! Activity Events
//!
//! Things the user is told about while an action runs. Each event renders to
//! the line a browser console would have shown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, OperationKind, TxHash, TxReceipt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActivityEvent {
    /// Signing agent handed out its accounts
    Connected {
        accounts: Vec<Address>,
        occurred_at: DateTime<Utc>,
    },

    /// No signing agent was found for an action
    AgentMissing {
        action: String,
        occurred_at: DateTime<Utc>,
    },

    /// A deposit is about to be submitted
    FundingStarted {
        amount: String,
        occurred_at: DateTime<Utc>,
    },

    /// A withdrawal is about to be submitted
    WithdrawStarted { occurred_at: DateTime<Utc> },

    /// Submission accepted, waiting for inclusion
    Mining {
        operation: OperationKind,
        tx_hash: TxHash,
        occurred_at: DateTime<Utc>,
    },

    /// Inclusion observed
    Confirmed {
        operation: OperationKind,
        tx_hash: TxHash,
        confirmations: u64,
        succeeded: bool,
        occurred_at: DateTime<Utc>,
    },

    /// Agent or node refused the submission
    Rejected {
        operation: OperationKind,
        reason: String,
        occurred_at: DateTime<Utc>,
    },

    /// Confirmation wait gave up
    ConfirmationTimedOut {
        operation: OperationKind,
        tx_hash: TxHash,
        occurred_at: DateTime<Utc>,
    },

    /// Contract balance read
    BalanceChecked {
        address: Address,
        ether: String,
        occurred_at: DateTime<Utc>,
    },
}

impl ActivityEvent {
    pub fn connected(accounts: Vec<Address>) -> Self {
        Self::Connected {
            accounts,
            occurred_at: Utc::now(),
        }
    }

    pub fn agent_missing(action: impl Into<String>) -> Self {
        Self::AgentMissing {
            action: action.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn funding_started(amount: impl Into<String>) -> Self {
        Self::FundingStarted {
            amount: amount.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn withdraw_started() -> Self {
        Self::WithdrawStarted {
            occurred_at: Utc::now(),
        }
    }

    pub fn mining(operation: OperationKind, tx_hash: TxHash) -> Self {
        Self::Mining {
            operation,
            tx_hash,
            occurred_at: Utc::now(),
        }
    }

    pub fn confirmed(operation: OperationKind, receipt: &TxReceipt) -> Self {
        Self::Confirmed {
            operation,
            tx_hash: receipt.transaction_hash,
            confirmations: receipt.confirmations,
            succeeded: receipt.succeeded(),
            occurred_at: Utc::now(),
        }
    }

    pub fn rejected(operation: OperationKind, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn confirmation_timed_out(operation: OperationKind, tx_hash: TxHash) -> Self {
        Self::ConfirmationTimedOut {
            operation,
            tx_hash,
            occurred_at: Utc::now(),
        }
    }

    pub fn balance_checked(address: Address, ether: impl Into<String>) -> Self {
        Self::BalanceChecked {
            address,
            ether: ether.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            ActivityEvent::Connected { .. } => "Connected",
            ActivityEvent::AgentMissing { .. } => "AgentMissing",
            ActivityEvent::FundingStarted { .. } => "FundingStarted",
            ActivityEvent::WithdrawStarted { .. } => "WithdrawStarted",
            ActivityEvent::Mining { .. } => "Mining",
            ActivityEvent::Confirmed { .. } => "Confirmed",
            ActivityEvent::Rejected { .. } => "Rejected",
            ActivityEvent::ConfirmationTimedOut { .. } => "ConfirmationTimedOut",
            ActivityEvent::BalanceChecked { .. } => "BalanceChecked",
        }
    }

    /// Console line for this event
    pub fn message(&self) -> String {
        match self {
            ActivityEvent::Connected { accounts, .. } => {
                format!("You're Connected! ({} account(s))", accounts.len())
            }
            ActivityEvent::AgentMissing { .. } => "Please install MetaMask!".to_string(),
            ActivityEvent::FundingStarted { amount, .. } => format!("Funding with {amount}..."),
            ActivityEvent::WithdrawStarted { .. } => "Withdrawing...".to_string(),
            ActivityEvent::Mining { tx_hash, .. } => format!("Mining {tx_hash}..."),
            ActivityEvent::Confirmed {
                confirmations,
                succeeded: true,
                ..
            } => format!("Completed with {confirmations} confirmations"),
            ActivityEvent::Confirmed { confirmations, .. } => {
                format!("Completed with {confirmations} confirmations (reverted)")
            }
            ActivityEvent::Rejected { reason, .. } => reason.clone(),
            ActivityEvent::ConfirmationTimedOut { tx_hash, .. } => {
                format!("Gave up waiting for {tx_hash}")
            }
            ActivityEvent::BalanceChecked { ether, .. } => ether.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExecutionStatus;

    #[test]
    fn test_messages_match_console_output() {
        assert_eq!(
            ActivityEvent::funding_started("0.1").message(),
            "Funding with 0.1..."
        );
        assert_eq!(ActivityEvent::withdraw_started().message(), "Withdrawing...");

        let receipt = TxReceipt {
            transaction_hash: TxHash::new([9; 32]),
            block_number: 12,
            confirmations: 1,
            status: ExecutionStatus::Success,
        };
        let event = ActivityEvent::confirmed(OperationKind::Deposit, &receipt);
        assert_eq!(event.message(), "Completed with 1 confirmations");
        assert_eq!(event.event_type(), "Confirmed");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let event = ActivityEvent::agent_missing("fund");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "AgentMissing");
        assert_eq!(json["action"], "fund");
    }
}
