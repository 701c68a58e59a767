//! Activity feed
//!
//! Bounded in-memory list of what the user has been told, newest last.
//! Served to the page so it can render status text.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::domain::ActivityEvent;

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<ActivityEvent>>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append an event, evicting the oldest one when full
    pub fn record(&self, event: ActivityEvent) {
        tracing::debug!(event_type = event.event_type(), message = %event.message(), "Activity");

        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// Up to `limit` most recent events, oldest first
    pub fn recent(&self, limit: usize) -> Vec<ActivityEvent> {
        let entries = self.entries.lock();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
