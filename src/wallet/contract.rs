//! Contract binding over JSON-RPC
//!
//! Sends `fund()` / `withdraw()` through the signing agent. The sender is the
//! agent's first account, the same account a browser provider's default
//! signer would use.

use async_trait::async_trait;

use crate::domain::{Address, TxHash, Wei};

use super::{ContractBinding, ContractInterface, JsonRpcProvider, TransactionRequest, WalletError};

#[derive(Debug, Clone)]
pub struct FundMeContract {
    address: Address,
    interface: ContractInterface,
    provider: JsonRpcProvider,
}

impl FundMeContract {
    /// Bind to the contract at `address`, checking the descriptor has a
    /// payable `fund` and a `withdraw`.
    pub fn new(
        address: Address,
        interface: ContractInterface,
        provider: JsonRpcProvider,
    ) -> Result<Self, WalletError> {
        interface.validate_fund_me()?;
        Ok(Self {
            address,
            interface,
            provider,
        })
    }

    async fn signer(&self) -> Result<Address, WalletError> {
        self.provider
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccounts)
    }

    async fn transact(&self, function: &str, value: Option<Wei>) -> Result<TxHash, WalletError> {
        let data = self.interface.encode_call(function)?;
        let from = self.signer().await?;

        let request = TransactionRequest {
            from,
            to: self.address,
            value,
            data,
        };
        let tx_hash = self.provider.send_transaction(&request).await?;

        tracing::debug!(function, from = %from, tx_hash = %tx_hash, "Contract call submitted");
        Ok(tx_hash)
    }
}

#[async_trait]
impl ContractBinding for FundMeContract {
    fn address(&self) -> Address {
        self.address
    }

    async fn fund(&self, value: Wei) -> Result<TxHash, WalletError> {
        self.transact("fund", Some(value)).await
    }

    async fn withdraw(&self) -> Result<TxHash, WalletError> {
        self.transact("withdraw", None).await
    }
}
