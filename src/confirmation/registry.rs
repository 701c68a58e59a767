//! Subscription registry
//!
//! One-shot listeners keyed by transaction hash, each with its own
//! confirmation depth. `notify` fires and forgets the listeners whose depth
//! the receipt reaches, so a listener fires at most once.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::domain::{TxHash, TxReceipt};

use super::PendingConfirmation;

#[derive(Debug)]
struct Listener {
    id: u64,
    min_confirmations: u64,
    sender: oneshot::Sender<TxReceipt>,
}

/// Registry of confirmation listeners shared between a provider and its watchers
#[derive(Debug, Default)]
pub struct Subscriptions {
    listeners: Mutex<HashMap<TxHash, Vec<Listener>>>,
    next_id: AtomicU64,
}

impl Subscriptions {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a one-shot listener that fires once `tx_hash` has
    /// `confirmations` confirmations (at least 1).
    pub fn subscribe(self: &Arc<Self>, tx_hash: TxHash, confirmations: u64) -> PendingConfirmation {
        let (sender, receiver) = oneshot::channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let min_confirmations = confirmations.max(1);

        self.listeners
            .lock()
            .entry(tx_hash)
            .or_default()
            .push(Listener {
                id,
                min_confirmations,
                sender,
            });

        tracing::trace!(tx_hash = %tx_hash, listener = id, min_confirmations, "Confirmation listener registered");
        PendingConfirmation::new(tx_hash, id, receiver, Arc::downgrade(self))
    }

    /// Deliver `receipt` to every listener of `tx_hash` whose depth it
    /// reaches, and forget those listeners. Deeper listeners keep waiting.
    ///
    /// Returns how many listeners received it. Repeating a notification
    /// finds nobody new and returns 0.
    pub fn notify(&self, tx_hash: &TxHash, receipt: &TxReceipt) -> usize {
        let due: Vec<Listener> = {
            let mut listeners = self.listeners.lock();
            let entries = listeners.remove(tx_hash).unwrap_or_default();
            let (due, waiting): (Vec<_>, Vec<_>) = entries
                .into_iter()
                .partition(|listener| listener.min_confirmations <= receipt.confirmations);
            if !waiting.is_empty() {
                listeners.insert(*tx_hash, waiting);
            }
            due
        };

        let delivered = due
            .into_iter()
            .map(|listener| listener.sender.send(receipt.clone()).is_ok())
            .filter(|sent| *sent)
            .count();

        if delivered > 0 {
            tracing::debug!(
                tx_hash = %tx_hash,
                confirmations = receipt.confirmations,
                delivered,
                "Confirmation delivered"
            );
        }
        delivered
    }

    pub fn has_listeners(&self, tx_hash: &TxHash) -> bool {
        self.listeners
            .lock()
            .get(tx_hash)
            .is_some_and(|listeners| !listeners.is_empty())
    }

    pub(crate) fn unsubscribe(&self, tx_hash: &TxHash, id: u64) {
        let mut listeners = self.listeners.lock();
        if let Some(entries) = listeners.get_mut(tx_hash) {
            entries.retain(|listener| listener.id != id);
            if entries.is_empty() {
                listeners.remove(tx_hash);
            }
        }
    }
}
