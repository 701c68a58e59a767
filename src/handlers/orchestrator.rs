//! Transaction Orchestrator
//!
//! Submits one state-changing call through the signing agent and resolves
//! once the ledger has recorded it.
//!
//! Exactly one request goes to the agent per call. A refused request ends
//! the flow immediately (no retry, no confirmation wait). An accepted one
//! yields a hash, and the orchestrator then waits on a one-shot subscription
//! for that hash.

use std::time::Duration;

use crate::activity::ActivityLog;
use crate::confirmation::ConfirmationError;
use crate::domain::{ActivityEvent, Operation, OperationContext, SubmissionState};
use crate::error::AppError;
use crate::wallet::SigningAgent;

use super::ConfirmedTransaction;

/// How long and how deep to wait for a confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationSettings {
    /// Blocks on top of (and including) the one holding the transaction
    pub confirmations: u64,
    /// `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout: None,
        }
    }
}

pub struct TransactionOrchestrator {
    settings: ConfirmationSettings,
    activity: ActivityLog,
}

impl TransactionOrchestrator {
    pub fn new(settings: ConfirmationSettings, activity: ActivityLog) -> Self {
        Self { settings, activity }
    }

    /// Submit `operation` and wait for its confirmation.
    pub async fn submit_and_confirm(
        &self,
        agent: &SigningAgent,
        operation: Operation,
        context: &OperationContext,
    ) -> Result<ConfirmedTransaction, AppError> {
        let state = SubmissionState::Idle;
        let kind = operation.kind();
        let value = operation.value();

        let submission = match operation {
            Operation::Deposit { amount } => agent.contract.fund(amount.to_wei()).await,
            Operation::Withdraw => agent.contract.withdraw().await,
        };

        let tx_hash = match submission {
            Ok(tx_hash) => tx_hash,
            Err(error) => {
                let state = state.reject(error.to_string())?;
                tracing::error!(
                    operation = %kind,
                    correlation_id = %context.correlation_id,
                    state = state.name(),
                    error = %error,
                    "Submission rejected"
                );
                self.activity
                    .record(ActivityEvent::rejected(kind, error.to_string()));
                return Err(AppError::SubmissionRejected(error));
            }
        };

        let state = state.submit(tx_hash)?;
        tracing::info!(operation = %kind, tx_hash = %tx_hash, "Mining {}...", tx_hash);
        self.activity.record(ActivityEvent::mining(kind, tx_hash));

        let pending = agent.provider.once(tx_hash, self.settings.confirmations);
        let receipt = match pending.wait(self.settings.timeout).await {
            Ok(receipt) => receipt,
            Err(error) => {
                if let ConfirmationError::TimedOut { .. } = error {
                    self.activity
                        .record(ActivityEvent::confirmation_timed_out(kind, tx_hash));
                }
                tracing::warn!(operation = %kind, tx_hash = %tx_hash, error = %error, "Confirmation wait ended");
                return Err(error.into());
            }
        };

        let state = state.confirm(receipt.clone())?;
        tracing::info!(
            operation = %kind,
            tx_hash = %tx_hash,
            block = receipt.block_number,
            state = state.name(),
            "Completed with {} confirmations",
            receipt.confirmations
        );
        if !receipt.succeeded() {
            tracing::warn!(tx_hash = %tx_hash, "Transaction included but reverted");
        }
        self.activity.record(ActivityEvent::confirmed(kind, &receipt));

        Ok(ConfirmedTransaction {
            operation: kind,
            tx_hash,
            value,
            receipt,
        })
    }
}
