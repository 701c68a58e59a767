//! Domain module
//!
//! Core domain types: amounts, chain identifiers, the submission lifecycle.

pub mod amount;
pub mod context;
pub mod error;
pub mod events;
pub mod primitives;
pub mod transaction;

pub use amount::{AmountError, EtherAmount, Wei, ETHER_DECIMALS};
pub use context::OperationContext;
pub use error::DomainError;
pub use events::ActivityEvent;
pub use primitives::{Address, TxHash};
pub use transaction::{ExecutionStatus, Operation, OperationKind, SubmissionState, TxReceipt};
