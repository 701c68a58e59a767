//! Connect Handler
//!
//! Asks the signing agent for account access.

use crate::activity::ActivityLog;
use crate::domain::ActivityEvent;
use crate::error::AppError;
use crate::wallet::SigningAgent;

use super::ConnectResult;

pub struct ConnectHandler {
    activity: ActivityLog,
}

impl ConnectHandler {
    pub fn new(activity: ActivityLog) -> Self {
        Self { activity }
    }

    pub async fn execute(&self, agent: &SigningAgent) -> Result<ConnectResult, AppError> {
        let accounts = agent.provider.request_accounts().await?;

        tracing::info!(accounts = accounts.len(), "Connected to signing agent");
        self.activity
            .record(ActivityEvent::connected(accounts.clone()));

        Ok(ConnectResult { accounts })
    }
}
