//! Operation Context
//!
//! Metadata about the current user action, used for tracing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for one user action (one button click).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    /// Action name (connect, fund, withdraw, balance)
    pub action: String,

    /// Correlation ID tying together every log line of this action
    pub correlation_id: Uuid,

    /// When the action was triggered
    pub started_at: DateTime<Utc>,
}

impl OperationContext {
    /// Create a context with a fresh correlation ID
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            correlation_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Override the correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Span carrying the action and correlation ID
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "action",
            action = %self.action,
            correlation_id = %self.correlation_id
        )
    }
}
