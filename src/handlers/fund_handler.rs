//! Fund Handler
//!
//! Deposits the user-entered amount into the contract.

use std::sync::Arc;

use crate::activity::ActivityLog;
use crate::domain::{ActivityEvent, EtherAmount, Operation, OperationContext};
use crate::error::AppError;
use crate::wallet::SigningAgent;

use super::{ConfirmedTransaction, FundCommand, TransactionOrchestrator};

/// Handler for deposits
pub struct FundHandler {
    orchestrator: Arc<TransactionOrchestrator>,
    activity: ActivityLog,
}

impl FundHandler {
    pub fn new(orchestrator: Arc<TransactionOrchestrator>, activity: ActivityLog) -> Self {
        Self {
            orchestrator,
            activity,
        }
    }

    /// Execute the fund command
    pub async fn execute(
        &self,
        agent: &SigningAgent,
        command: FundCommand,
        context: &OperationContext,
    ) -> Result<ConfirmedTransaction, AppError> {
        // Parse and validate amount before anything reaches the agent
        let amount: EtherAmount = command.amount.parse()?;

        tracing::info!(wei = %amount.to_wei(), "Funding with {}...", amount);
        self.activity
            .record(ActivityEvent::funding_started(amount.to_string()));

        let confirmed = self
            .orchestrator
            .submit_and_confirm(agent, Operation::Deposit { amount }, context)
            .await?;

        tracing::info!("Done!");
        Ok(confirmed)
    }
}
