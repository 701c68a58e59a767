//! Wallet module
//!
//! Collaborators the orchestrator talks to: the wallet provider (accounts,
//! balances, confirmation subscriptions), the contract binding (`fund`,
//! `withdraw`) and the probe that finds out whether a signing agent exists.

mod agent;
mod contract;
mod error;
mod interface;
mod rpc;

use async_trait::async_trait;

use crate::confirmation::PendingConfirmation;
use crate::domain::{Address, TxHash, Wei};

pub use agent::{AgentPresence, AgentProbe, RpcAgentProbe, SigningAgent, StaticAgentProbe};
pub use contract::FundMeContract;
pub use error::{WalletError, METHOD_NOT_FOUND_CODE, USER_REJECTED_CODE};
pub use interface::ContractInterface;
pub use rpc::{JsonRpcProvider, TransactionRequest};

/// Connection to the user's wallet
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the agent for its accounts (may prompt the user)
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Native-currency balance of `address`
    async fn get_balance(&self, address: Address) -> Result<Wei, WalletError>;

    /// Subscribe once to the inclusion of `tx_hash`, firing after
    /// `confirmations` blocks
    fn once(&self, tx_hash: TxHash, confirmations: u64) -> PendingConfirmation;
}

/// Remote operations of the deployed contract
#[async_trait]
pub trait ContractBinding: Send + Sync {
    fn address(&self) -> Address;

    /// Payable deposit; returns as soon as the agent accepted the request
    async fn fund(&self, value: Wei) -> Result<TxHash, WalletError>;

    /// Withdraw everything; returns as soon as the agent accepted the request
    async fn withdraw(&self) -> Result<TxHash, WalletError>;
}
