//! Command definitions
//!
//! Commands carry what the user entered; results carry what gets shown back.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, OperationKind, TxHash, TxReceipt, Wei};

// =========================================================================
// Commands
// =========================================================================

/// Command to deposit native currency into the contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundCommand {
    /// Amount in ether as typed by the user (string for precise decimal)
    pub amount: String,
}

impl FundCommand {
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
        }
    }
}

/// Command to withdraw all funds from the contract
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WithdrawCommand;

// =========================================================================
// Results
// =========================================================================

/// Result of a successful connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectResult {
    pub accounts: Vec<Address>,
}

/// A submitted operation whose confirmation has been observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedTransaction {
    pub operation: OperationKind,
    pub tx_hash: TxHash,
    pub value: Wei,
    pub receipt: TxReceipt,
}

impl ConfirmedTransaction {
    /// Whether the contract call itself executed without reverting
    pub fn succeeded(&self) -> bool {
        self.receipt.succeeded()
    }
}

/// Balance of the contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub address: Address,
    pub wei: Wei,
    /// Decimal ether string, e.g. `"0.01"`
    pub ether: String,
}

impl BalanceReport {
    pub fn new(address: Address, wei: Wei) -> Self {
        Self {
            address,
            wei,
            ether: wei.format_ether(),
        }
    }
}
