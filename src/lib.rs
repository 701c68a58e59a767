//! fund_me_client Library
//!
//! Re-exports modules for integration testing and external use.

pub mod actions;
pub mod activity;
pub mod api;
pub mod confirmation;
pub mod domain;
pub mod handlers;
pub mod wallet;

pub mod config;
mod error;

pub use actions::{Action, ActionBindings, ActionKind, ActionOutcome, Dispatcher};
pub use config::Config;
pub use domain::{AmountError, DomainError, EtherAmount, OperationContext, Wei};
pub use error::{AppError, AppResult, ErrorResponse};
