//! Pending confirmation
//!
//! Future side of a one-shot subscription. Waiting takes an optional timeout;
//! cancelling (or dropping) unregisters the listener.

use std::sync::Weak;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::domain::{TxHash, TxReceipt};

use super::Subscriptions;

/// Errors that end a confirmation wait without a receipt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfirmationError {
    #[error("Timed out after {after:?} waiting for confirmation of {tx_hash}")]
    TimedOut { tx_hash: TxHash, after: Duration },

    #[error("Confirmation watcher for {0} stopped before the transaction was confirmed")]
    Closed(TxHash),
}

/// A registered, not yet fired confirmation listener
#[derive(Debug)]
pub struct PendingConfirmation {
    tx_hash: TxHash,
    id: u64,
    receiver: oneshot::Receiver<TxReceipt>,
    registry: Weak<Subscriptions>,
}

impl PendingConfirmation {
    pub(crate) fn new(
        tx_hash: TxHash,
        id: u64,
        receiver: oneshot::Receiver<TxReceipt>,
        registry: Weak<Subscriptions>,
    ) -> Self {
        Self {
            tx_hash,
            id,
            receiver,
            registry,
        }
    }

    /// Wait for the receipt.
    ///
    /// `None` waits for as long as it takes.
    pub async fn wait(mut self, timeout: Option<Duration>) -> Result<TxReceipt, ConfirmationError> {
        let tx_hash = self.tx_hash;
        let receiver = &mut self.receiver;

        match timeout {
            None => receiver.await.map_err(|_| ConfirmationError::Closed(tx_hash)),
            Some(after) => match tokio::time::timeout(after, receiver).await {
                Ok(received) => received.map_err(|_| ConfirmationError::Closed(tx_hash)),
                Err(_) => Err(ConfirmationError::TimedOut { tx_hash, after }),
            },
        }
    }

    /// Stop listening. Any later notification for this hash skips this listener.
    pub fn cancel(self) {
        tracing::debug!(tx_hash = %self.tx_hash, "Confirmation wait cancelled");
    }
}

impl Drop for PendingConfirmation {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unsubscribe(&self.tx_hash, self.id);
        }
    }
}
