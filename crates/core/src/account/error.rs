//! Account error types.

use finapi_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::TaxId;

/// Errors that can occur during account store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Another live account already uses this tax identifier.
    #[error("Customer already exists")]
    AlreadyExists(TaxId),

    /// No account matches the supplied credential.
    #[error("Customer not found")]
    NotFound,

    /// No account has the requested id.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The requested account is not the authenticated one.
    #[error("Account {requested} does not belong to the authenticated customer")]
    AccountMismatch {
        /// Id named by the request.
        requested: AccountId,
        /// Id of the account resolved from the credential.
        authenticated: AccountId,
    },

    /// An account can only be deleted with a zero balance.
    #[error("Account balance must be zero to delete it (balance: {0})")]
    NonZeroBalance(Decimal),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::NotFound => "CUSTOMER_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountMismatch { .. } => "ACCOUNT_MISMATCH",
            Self::NonZeroBalance(_) => "NON_ZERO_BALANCE",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Unknown credentials answer 400, not 401, like the service always has.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AlreadyExists(_) | Self::NotFound | Self::NonZeroBalance(_) => 400,
            Self::AccountMismatch { .. } => 403,
            Self::AccountNotFound(_) => 404,
        }
    }
}
