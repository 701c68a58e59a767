//! JSON-RPC provider
//!
//! Talks to the signing agent over HTTP JSON-RPC (an EIP-1193 bridge or a
//! development node with unlocked accounts). Confirmations are observed by a
//! per-hash watcher task polling for the receipt.

use alloy_primitives::{Bytes, U256, U64};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::confirmation::{PendingConfirmation, Subscriptions};
use crate::domain::{Address, ExecutionStatus, TxHash, TxReceipt, Wei};

use super::{WalletError, WalletProvider};

/// Upper bound for the `web3_clientVersion` round trip
const CLIENT_VERSION_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    block_number: Option<U64>,
    #[serde(default)]
    status: Option<U64>,
}

/// `eth_sendTransaction` parameters for an argument-less contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub value: Option<Wei>,
    pub data: Bytes,
}

impl TransactionRequest {
    pub fn to_json(&self) -> Value {
        let mut request = json!({
            "from": self.from,
            "to": self.to,
            "data": self.data,
        });
        if let Some(value) = self.value {
            request["value"] = json!(value.value());
        }
        request
    }
}

#[derive(Debug)]
struct Inner {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
    next_id: AtomicU64,
    poll_interval: Duration,
    subscriptions: Arc<Subscriptions>,
    /// Hashes with a running watcher
    watching: Mutex<HashSet<TxHash>>,
}

/// HTTP JSON-RPC connection to the signing agent
#[derive(Debug, Clone)]
pub struct JsonRpcProvider {
    inner: Arc<Inner>,
}

impl JsonRpcProvider {
    /// Provider whose every request gives up after `timeout`
    pub fn new(
        url: impl Into<String>,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                url: url.into(),
                client,
                timeout,
                next_id: AtomicU64::new(1),
                poll_interval,
                subscriptions: Subscriptions::new(),
                watching: Mutex::new(HashSet::new()),
            }),
        })
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    pub fn subscriptions(&self) -> &Arc<Subscriptions> {
        &self.inner.subscriptions
    }

    /// Issue one JSON-RPC call
    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, WalletError> {
        self.request_within(method, params, self.inner.timeout).await
    }

    async fn request_within<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<T, WalletError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(method, id, "JSON-RPC request");

        let response: RpcResponse = self
            .inner
            .client
            .post(&self.inner.url)
            .timeout(timeout)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            tracing::debug!(method, code = error.code, message = %error.message, "JSON-RPC error");
            return Err(WalletError::from_rpc(error.code, error.message));
        }

        serde_json::from_value(response.result.unwrap_or(Value::Null))
            .map_err(|e| WalletError::InvalidResponse(format!("{method}: {e}")))
    }

    /// `web3_clientVersion`, answered quickly or not at all
    pub async fn client_version(&self) -> Result<String, WalletError> {
        let timeout = self.inner.timeout.min(CLIENT_VERSION_TIMEOUT);
        self.request_within("web3_clientVersion", json!([]), timeout)
            .await
    }

    /// `eth_requestAccounts`, falling back to `eth_accounts` on nodes that
    /// do not implement the wallet method
    pub async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self.request("eth_requestAccounts", json!([])).await {
            Err(error) if error.is_method_not_found() => {
                tracing::debug!("eth_requestAccounts unsupported, using eth_accounts");
                self.request("eth_accounts", json!([])).await
            }
            other => other,
        }
    }

    pub async fn balance(&self, address: Address) -> Result<Wei, WalletError> {
        let balance: U256 = self
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        Ok(Wei::from(balance))
    }

    pub async fn block_number(&self) -> Result<u64, WalletError> {
        let head: U64 = self.request("eth_blockNumber", json!([])).await?;
        Ok(head.to::<u64>())
    }

    pub async fn send_transaction(&self, request: &TransactionRequest) -> Result<TxHash, WalletError> {
        self.request("eth_sendTransaction", json!([request.to_json()]))
            .await
    }

    /// Receipt of `tx_hash` if it has been included, with the confirmation
    /// count relative to the current head
    pub async fn transaction_receipt(&self, tx_hash: &TxHash) -> Result<Option<TxReceipt>, WalletError> {
        let raw: Option<RawReceipt> = self
            .request("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;

        let Some(raw) = raw else {
            return Ok(None);
        };
        // pending receipts carry no block yet
        let Some(block) = raw.block_number else {
            return Ok(None);
        };

        let block_number = block.to::<u64>();
        let head = self.block_number().await?;
        let status = match raw.status {
            Some(status) if status.is_zero() => ExecutionStatus::Reverted,
            _ => ExecutionStatus::Success,
        };

        Ok(Some(TxReceipt {
            transaction_hash: raw.transaction_hash,
            block_number,
            confirmations: head.saturating_sub(block_number) + 1,
            status,
        }))
    }

    fn ensure_watcher(&self, tx_hash: TxHash) {
        if !self.inner.watching.lock().insert(tx_hash) {
            return;
        }

        let provider = self.clone();
        tokio::spawn(async move { provider.watch(tx_hash).await });
    }

    /// Poll until every listener of `tx_hash` has fired or gone away. Each
    /// receipt is offered to the registry, which fires the listeners whose
    /// depth it reaches.
    async fn watch(self, tx_hash: TxHash) {
        let mut ticker = tokio::time::interval(self.inner.poll_interval);
        tracing::debug!(tx_hash = %tx_hash, "Watching for confirmation");

        loop {
            ticker.tick().await;

            {
                let mut watching = self.inner.watching.lock();
                if !self.inner.subscriptions.has_listeners(&tx_hash) {
                    watching.remove(&tx_hash);
                    tracing::debug!(tx_hash = %tx_hash, "No listeners left, watcher stopped");
                    return;
                }
            }

            match self.transaction_receipt(&tx_hash).await {
                Ok(Some(receipt)) => {
                    self.inner.subscriptions.notify(&tx_hash, &receipt);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(tx_hash = %tx_hash, error = %error, "Receipt poll failed");
                }
            }
        }
    }
}

#[async_trait]
impl WalletProvider for JsonRpcProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.accounts().await
    }

    async fn get_balance(&self, address: Address) -> Result<Wei, WalletError> {
        self.balance(address).await
    }

    fn once(&self, tx_hash: TxHash, confirmations: u64) -> PendingConfirmation {
        let pending = self.inner.subscriptions.subscribe(tx_hash, confirmations);
        self.ensure_watcher(tx_hash);
        pending
    }
}
