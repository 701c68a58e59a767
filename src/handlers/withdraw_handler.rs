//! Withdraw Handler
//!
//! Pulls everything out of the contract.

use std::sync::Arc;

use crate::activity::ActivityLog;
use crate::domain::{ActivityEvent, Operation, OperationContext};
use crate::error::AppError;
use crate::wallet::SigningAgent;

use super::{ConfirmedTransaction, TransactionOrchestrator, WithdrawCommand};

/// Handler for withdrawals
pub struct WithdrawHandler {
    orchestrator: Arc<TransactionOrchestrator>,
    activity: ActivityLog,
}

impl WithdrawHandler {
    pub fn new(orchestrator: Arc<TransactionOrchestrator>, activity: ActivityLog) -> Self {
        Self {
            orchestrator,
            activity,
        }
    }

    pub async fn execute(
        &self,
        agent: &SigningAgent,
        _command: WithdrawCommand,
        context: &OperationContext,
    ) -> Result<ConfirmedTransaction, AppError> {
        tracing::info!("Withdrawing...");
        self.activity.record(ActivityEvent::withdraw_started());

        self.orchestrator
            .submit_and_confirm(agent, Operation::Withdraw, context)
            .await
    }
}
