//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Entry lifecycle and journal domain types
//! - Business rule validation for entry creation and validation
//! - Balance and general-ledger aggregation
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod service_props;

pub use balance::{
    AccountBalance, BalanceSide, BalanceTotals, LedgerLine, LedgerRow, LedgerTotals, PostedLine,
    aggregate_balance, running_ledger,
};
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{CreateEntryInput, EntryStatus, EntryTotals, Journal, LineInput};
