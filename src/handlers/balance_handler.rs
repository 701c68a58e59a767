//! Balance Handler
//!
//! Reads how much native currency the contract holds.

use crate::activity::ActivityLog;
use crate::domain::ActivityEvent;
use crate::error::AppError;
use crate::wallet::SigningAgent;

use super::BalanceReport;

pub struct BalanceHandler {
    activity: ActivityLog,
}

impl BalanceHandler {
    pub fn new(activity: ActivityLog) -> Self {
        Self { activity }
    }

    pub async fn execute(&self, agent: &SigningAgent) -> Result<BalanceReport, AppError> {
        let address = agent.contract.address();
        let wei = agent.provider.get_balance(address).await?;
        let report = BalanceReport::new(address, wei);

        tracing::info!(address = %address, wei = %wei, "{}", report.ether);
        self.activity
            .record(ActivityEvent::balance_checked(address, report.ether.clone()));

        Ok(report)
    }
}
