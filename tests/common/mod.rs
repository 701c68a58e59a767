//! Common test utilities
//!
//! A fake JSON-RPC node with unlocked accounts, served on an ephemeral port.

#![allow(dead_code)]

use axum::{extract::State, routing::post, Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use fund_me_client::domain::{Address, TxHash};
use fund_me_client::{Config, Dispatcher};

pub const ACCOUNT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const CONTRACT: &str = "0xcccccccccccccccccccccccccccccccccccccccc";
pub const WITHDRAW_DATA: &str = "0x3ccfd60b";

#[derive(Debug)]
pub struct NodeState {
    pub accounts: Vec<String>,
    pub balances: HashMap<String, u128>,
    pub head: u64,
    /// tx hash -> (block, succeeded)
    pub receipts: HashMap<TxHash, (u64, bool)>,
    pub sent: Vec<Value>,
    /// Error returned for every `eth_sendTransaction`
    pub reject_sends: Option<(i64, String)>,
    pub supports_request_accounts: bool,
    /// Include each transaction in a fresh block as soon as it is sent
    pub auto_mine: bool,
    /// Mark included transactions as reverted
    pub revert: bool,
    pub next_tx: u64,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            accounts: vec![ACCOUNT.to_string()],
            balances: HashMap::new(),
            head: 100,
            receipts: HashMap::new(),
            sent: Vec::new(),
            reject_sends: None,
            supports_request_accounts: true,
            auto_mine: true,
            revert: false,
            next_tx: 0,
        }
    }
}

#[derive(Clone)]
pub struct FakeNode {
    pub url: String,
    pub state: Arc<Mutex<NodeState>>,
}

impl FakeNode {
    /// Start a node with default state
    pub async fn spawn() -> Self {
        Self::spawn_with(NodeState::default()).await
    }

    pub async fn spawn_with(state: NodeState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new().route("/", post(rpc)).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    /// Append `blocks` empty blocks
    pub fn mine(&self, blocks: u64) {
        self.state.lock().head += blocks;
    }

    /// Include every sent but unmined transaction in the next block
    pub fn include_pending(&self) {
        let mut state = self.state.lock();
        state.head += 1;
        let head = state.head;
        let revert = state.revert;
        let pending: Vec<TxHash> = (1..=state.next_tx)
            .map(tx_hash)
            .filter(|hash| !state.receipts.contains_key(hash))
            .collect();
        for hash in pending {
            state.receipts.insert(hash, (head, !revert));
        }
    }

    pub fn sent(&self) -> Vec<Value> {
        self.state.lock().sent.clone()
    }

    pub fn balance_of(&self, address: &str) -> u128 {
        self.state.lock().balances.get(address).copied().unwrap_or(0)
    }
}

pub fn tx_hash(n: u64) -> TxHash {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    TxHash::new(bytes)
}

pub fn contract_address() -> Address {
    CONTRACT.parse().unwrap()
}

pub fn account_address() -> Address {
    ACCOUNT.parse().unwrap()
}

async fn rpc(State(state): State<Arc<Mutex<NodeState>>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();

    let outcome = handle(&mut state.lock(), &method, &params);

    Json(match outcome {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err((code, message)) => {
            json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
        }
    })
}

fn handle(state: &mut NodeState, method: &str, params: &Value) -> Result<Value, (i64, String)> {
    match method {
        "web3_clientVersion" => Ok(json!("FakeNode/v0.1.0")),
        "eth_requestAccounts" if !state.supports_request_accounts => {
            Err((-32601, "Method not found".to_string()))
        }
        "eth_requestAccounts" | "eth_accounts" => Ok(json!(state.accounts)),
        "eth_blockNumber" => Ok(json!(format!("0x{:x}", state.head))),
        "eth_getBalance" => {
            let address = params[0].as_str().unwrap_or_default().to_lowercase();
            let balance = state.balances.get(&address).copied().unwrap_or(0);
            Ok(json!(format!("0x{:x}", balance)))
        }
        "eth_sendTransaction" => {
            if let Some(error) = state.reject_sends.clone() {
                return Err(error);
            }
            let tx = params[0].clone();
            let to = tx["to"].as_str().unwrap_or_default().to_lowercase();
            let value = tx["value"]
                .as_str()
                .and_then(|v| u128::from_str_radix(v.trim_start_matches("0x"), 16).ok())
                .unwrap_or(0);

            if tx["data"] == WITHDRAW_DATA {
                state.balances.insert(to, 0);
            } else {
                *state.balances.entry(to).or_default() += value;
            }
            state.sent.push(tx);

            state.next_tx += 1;
            let hash = tx_hash(state.next_tx);
            if state.auto_mine {
                state.head += 1;
                let included = (state.head, !state.revert);
                state.receipts.insert(hash, included);
            }
            Ok(json!(hash))
        }
        "eth_getTransactionReceipt" => {
            let hash: TxHash = serde_json::from_value(params[0].clone())
                .map_err(|e| (-32602, e.to_string()))?;
            Ok(match state.receipts.get(&hash) {
                Some((block, succeeded)) => json!({
                    "transactionHash": hash,
                    "blockNumber": format!("0x{:x}", block),
                    "status": if *succeeded { "0x1" } else { "0x0" },
                }),
                None => Value::Null,
            })
        }
        _ => Err((-32601, format!("Method not found: {method}"))),
    }
}

/// Configuration pointing at `rpc_url`, overridable per key
pub fn config(rpc_url: &str, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("RPC_URL".to_string(), rpc_url.to_string()),
        ("CONTRACT_ADDRESS".to_string(), CONTRACT.to_string()),
        ("RECEIPT_POLL_INTERVAL_MS".to_string(), "10".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Dispatcher wired to `node` through the JSON-RPC stack
pub fn dispatcher(node: &FakeNode, overrides: &[(&str, &str)]) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::from_config(&config(&node.url, overrides)).unwrap())
}

/// Dispatcher whose endpoint refuses connections
pub fn unreachable_dispatcher() -> Arc<Dispatcher> {
    Arc::new(Dispatcher::from_config(&config("http://127.0.0.1:9", &[])).unwrap())
}

/// Endpoint that accepts connections and never answers
pub async fn silent_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

pub const POLL: Duration = Duration::from_millis(10);

/// Request timeout used by providers built in tests
pub const RPC_TIMEOUT: Duration = Duration::from_secs(5);
