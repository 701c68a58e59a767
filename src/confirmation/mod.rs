//! Confirmation module
//!
//! One-shot confirmation subscriptions. A provider registers a listener per
//! submitted transaction and notifies it once the transaction is included.

mod pending;
mod registry;

pub use pending::{ConfirmationError, PendingConfirmation};
pub use registry::Subscriptions;
