//! Ledger error types.

use chrono::NaiveDate;
use finapi_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Withdrawal larger than the current balance.
    #[error("Insufficient funds. Balance: {balance}, requested: {requested}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: Decimal,
        /// Amount the caller tried to withdraw.
        requested: Decimal,
    },

    /// No operation was recorded on the requested day.
    #[error("No operations on {0}")]
    NoOperationsThatDay(NaiveDate),

    /// Operation amount cannot be negative.
    #[error("Operation amount cannot be negative")]
    NegativeAmount,

    /// Credit would push the balance past the largest representable amount.
    #[error("Amount overflow. Balance: {balance}, requested: {requested}")]
    AmountOverflow {
        /// Balance at the time of the attempt.
        balance: Decimal,
        /// Amount the caller tried to credit.
        requested: Decimal,
    },

    /// The account was deleted after the handle was resolved.
    #[error("Account {0} is closed")]
    AccountClosed(AccountId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::NoOperationsThatDay(_) => "NO_OPERATIONS_THAT_DAY",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
            Self::AccountClosed(_) => "ACCOUNT_CLOSED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientFunds { .. } | Self::NegativeAmount | Self::AmountOverflow { .. } => {
                400
            }
            Self::NoOperationsThatDay(_) | Self::AccountClosed(_) => 404,
        }
    }
}
