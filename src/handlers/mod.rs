//! Command Handlers module
//!
//! One handler per user action. Deposit and withdraw go through the
//! `TransactionOrchestrator`; connect and balance are single reads.

mod balance_handler;
mod commands;
mod connect_handler;
mod fund_handler;
mod orchestrator;
mod withdraw_handler;


pub use balance_handler::BalanceHandler;
pub use commands::*;
pub use connect_handler::ConnectHandler;
pub use fund_handler::FundHandler;
pub use orchestrator::{ConfirmationSettings, TransactionOrchestrator};
pub use withdraw_handler::WithdrawHandler;
