//! Signing agent presence
//!
//! Every action starts by probing for the agent. The probe answers with a
//! typed presence instead of a global flag.

use async_trait::async_trait;
use std::sync::Arc;

use super::{ContractBinding, FundMeContract, JsonRpcProvider, WalletProvider};

/// A reachable signing agent and the contract bound through it
#[derive(Clone)]
pub struct SigningAgent {
    pub provider: Arc<dyn WalletProvider>,
    pub contract: Arc<dyn ContractBinding>,
}

impl SigningAgent {
    pub fn new(provider: Arc<dyn WalletProvider>, contract: Arc<dyn ContractBinding>) -> Self {
        Self { provider, contract }
    }
}

impl std::fmt::Debug for SigningAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningAgent")
            .field("contract", &self.contract.address())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum AgentPresence {
    Present(SigningAgent),
    Absent,
}

impl AgentPresence {
    pub fn is_present(&self) -> bool {
        matches!(self, AgentPresence::Present(_))
    }
}

/// Capability probe for the signing agent
#[async_trait]
pub trait AgentProbe: Send + Sync {
    async fn probe(&self) -> AgentPresence;
}

/// Probes a JSON-RPC endpoint with `web3_clientVersion`
#[derive(Debug, Clone)]
pub struct RpcAgentProbe {
    provider: JsonRpcProvider,
    contract: Arc<FundMeContract>,
}

impl RpcAgentProbe {
    pub fn new(provider: JsonRpcProvider, contract: FundMeContract) -> Self {
        Self {
            provider,
            contract: Arc::new(contract),
        }
    }
}

#[async_trait]
impl AgentProbe for RpcAgentProbe {
    async fn probe(&self) -> AgentPresence {
        match self.provider.client_version().await {
            Ok(version) => {
                tracing::debug!(client = %version, "Signing agent present");
                AgentPresence::Present(SigningAgent::new(
                    Arc::new(self.provider.clone()),
                    self.contract.clone(),
                ))
            }
            Err(error) => {
                tracing::warn!(url = self.provider.url(), error = %error, "Signing agent unreachable");
                AgentPresence::Absent
            }
        }
    }
}

/// Probe with a fixed answer, for agents injected by the host application
#[derive(Debug, Clone)]
pub struct StaticAgentProbe {
    agent: Option<SigningAgent>,
}

impl StaticAgentProbe {
    pub fn present(agent: SigningAgent) -> Self {
        Self { agent: Some(agent) }
    }

    pub fn absent() -> Self {
        Self { agent: None }
    }
}

#[async_trait]
impl AgentProbe for StaticAgentProbe {
    async fn probe(&self) -> AgentPresence {
        match &self.agent {
            Some(agent) => AgentPresence::Present(agent.clone()),
            None => AgentPresence::Absent,
        }
    }
}
