//! Account statement ledger.
//!
//! This module implements the per-account ledger:
//! - Statement operations (credits and debits)
//! - Append-only statements with a running balance
//! - Balance calculations
//! - Calendar-day filtering
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod operation;
pub mod service;
pub mod statement;

#[cfg(test)]
mod service_props;

pub use balance::fold_balance;
pub use error::LedgerError;
pub use operation::{Operation, OperationType};
pub use service::Ledger;
pub use statement::Statement;
