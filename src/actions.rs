//! User actions
//!
//! Maps UI element identifiers to the four user actions and runs them. Every
//! action probes for the signing agent first; when none is present the action
//! ends with the install signal and nothing is submitted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

use crate::activity::ActivityLog;
use crate::config::Config;
use crate::domain::{ActivityEvent, Address, OperationContext};
use crate::error::AppError;
use crate::handlers::{
    BalanceHandler, BalanceReport, ConfirmationSettings, ConfirmedTransaction, ConnectHandler,
    FundCommand, FundHandler, TransactionOrchestrator, WithdrawCommand, WithdrawHandler,
};
use crate::wallet::{AgentPresence, AgentProbe, FundMeContract, JsonRpcProvider, RpcAgentProbe};

pub const CONNECTED_TEXT: &str = "You're Connected!";
pub const INSTALL_TEXT: &str = "Please install MetaMask!";

// =========================================================================
// Bindings
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Connect,
    Fund,
    Withdraw,
    Balance,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Connect => "connect",
            ActionKind::Fund => "fund",
            ActionKind::Withdraw => "withdraw",
            ActionKind::Balance => "balance",
        }
    }
}

/// Which element triggers which action, and where the deposit amount is read from
#[derive(Debug, Clone)]
pub struct ActionBindings {
    elements: HashMap<String, ActionKind>,
    amount_input: String,
}

impl ActionBindings {
    /// Bindings with no elements
    pub fn empty(amount_input: impl Into<String>) -> Self {
        Self {
            elements: HashMap::new(),
            amount_input: amount_input.into(),
        }
    }

    pub fn bind(mut self, element_id: impl Into<String>, kind: ActionKind) -> Self {
        self.elements.insert(element_id.into(), kind);
        self
    }

    pub fn resolve(&self, element_id: &str) -> Option<ActionKind> {
        self.elements.get(element_id).copied()
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self::empty("ethAmount")
            .bind("connectButton", ActionKind::Connect)
            .bind("fundButton", ActionKind::Fund)
            .bind("withdrawButton", ActionKind::Withdraw)
            .bind("balanceButton", ActionKind::Balance)
    }
}

// =========================================================================
// Actions and outcomes
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Connect,
    Fund { amount: String },
    Withdraw,
    Balance,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Connect => ActionKind::Connect,
            Action::Fund { .. } => ActionKind::Fund,
            Action::Withdraw => ActionKind::Withdraw,
            Action::Balance => ActionKind::Balance,
        }
    }
}

/// What the user sees once an action finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
    Connected {
        text: String,
        accounts: Vec<Address>,
    },
    Confirmed {
        text: String,
        transaction: ConfirmedTransaction,
    },
    Balance {
        text: String,
        balance: BalanceReport,
    },
    AgentMissing {
        text: String,
    },
}

impl ActionOutcome {
    pub fn text(&self) -> &str {
        match self {
            ActionOutcome::Connected { text, .. }
            | ActionOutcome::Confirmed { text, .. }
            | ActionOutcome::Balance { text, .. }
            | ActionOutcome::AgentMissing { text } => text,
        }
    }

    pub fn is_agent_missing(&self) -> bool {
        matches!(self, ActionOutcome::AgentMissing { .. })
    }

    fn confirmed(transaction: ConfirmedTransaction) -> Self {
        let text = format!(
            "Completed with {} confirmations",
            transaction.receipt.confirmations
        );
        ActionOutcome::Confirmed { text, transaction }
    }
}

// =========================================================================
// Dispatcher
// =========================================================================

pub struct Dispatcher {
    bindings: ActionBindings,
    probe: Arc<dyn AgentProbe>,
    activity: ActivityLog,
    connect: ConnectHandler,
    fund: FundHandler,
    withdraw: WithdrawHandler,
    balance: BalanceHandler,
}

impl Dispatcher {
    /// Wire the handlers around a probe
    pub fn init(
        bindings: ActionBindings,
        probe: Arc<dyn AgentProbe>,
        settings: ConfirmationSettings,
        activity: ActivityLog,
    ) -> Self {
        let orchestrator = Arc::new(TransactionOrchestrator::new(settings, activity.clone()));

        Self {
            bindings,
            probe,
            connect: ConnectHandler::new(activity.clone()),
            fund: FundHandler::new(orchestrator.clone(), activity.clone()),
            withdraw: WithdrawHandler::new(orchestrator, activity.clone()),
            balance: BalanceHandler::new(activity.clone()),
            activity,
        }
    }

    /// Dispatcher talking to the JSON-RPC endpoint named in `config`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let interface = config.load_interface()?;
        let provider = JsonRpcProvider::new(
            config.rpc_url.clone(),
            config.receipt_poll_interval,
            config.rpc_timeout,
        )?;
        let contract = FundMeContract::new(config.contract_address, interface, provider.clone())?;
        let probe = RpcAgentProbe::new(provider, contract);

        Ok(Self::init(
            ActionBindings::default(),
            Arc::new(probe),
            config.confirmation_settings(),
            ActivityLog::new(config.activity_capacity),
        ))
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn bindings(&self) -> &ActionBindings {
        &self.bindings
    }

    /// Run one action to completion
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome, AppError> {
        let context = OperationContext::new(action.kind().as_str());
        let span = context.span();

        self.run(action, &context).instrument(span).await
    }

    /// Run the action bound to `element_id`, reading inputs by name
    pub async fn dispatch_event(
        &self,
        element_id: &str,
        inputs: &HashMap<String, String>,
    ) -> Result<ActionOutcome, AppError> {
        let kind = self
            .bindings
            .resolve(element_id)
            .ok_or_else(|| AppError::UnknownElement(element_id.to_string()))?;

        let action = match kind {
            ActionKind::Connect => Action::Connect,
            ActionKind::Fund => Action::Fund {
                amount: inputs
                    .get(self.bindings.amount_input())
                    .cloned()
                    .unwrap_or_default(),
            },
            ActionKind::Withdraw => Action::Withdraw,
            ActionKind::Balance => Action::Balance,
        };

        self.dispatch(action).await
    }

    async fn run(&self, action: Action, context: &OperationContext) -> Result<ActionOutcome, AppError> {
        let agent = match self.probe.probe().await {
            AgentPresence::Present(agent) => agent,
            AgentPresence::Absent => {
                tracing::warn!("{}", INSTALL_TEXT);
                self.activity
                    .record(ActivityEvent::agent_missing(context.action.clone()));
                return Ok(ActionOutcome::AgentMissing {
                    text: INSTALL_TEXT.to_string(),
                });
            }
        };

        match action {
            Action::Connect => {
                let result = self.connect.execute(&agent).await?;
                Ok(ActionOutcome::Connected {
                    text: CONNECTED_TEXT.to_string(),
                    accounts: result.accounts,
                })
            }
            Action::Fund { amount } => {
                let confirmed = self
                    .fund
                    .execute(&agent, FundCommand::new(amount), context)
                    .await?;
                Ok(ActionOutcome::confirmed(confirmed))
            }
            Action::Withdraw => {
                let confirmed = self
                    .withdraw
                    .execute(&agent, WithdrawCommand, context)
                    .await?;
                Ok(ActionOutcome::confirmed(confirmed))
            }
            Action::Balance => {
                let balance = self.balance.execute(&agent).await?;
                Ok(ActionOutcome::Balance {
                    text: balance.ether.clone(),
                    balance,
                })
            }
        }
    }
}
