//! Core business logic for FinAPI.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! All domain types, invariants, and balance calculations live here.
//!
//! # Modules
//!
//! - `account` - Account identity, the in-memory account store
//! - `ledger` - Statement operations, balances, day filtering
//! - `clock` - Time source and the reference time zone for calendar days

pub mod account;
pub mod clock;
pub mod ledger;

pub use account::{Account, AccountError, AccountHandle, AccountStore, IdGenerator, TaxId};
pub use clock::{Clock, ManualClock, ReferenceZone, SystemClock};
pub use ledger::{Ledger, LedgerError, Operation, OperationType, Statement};
