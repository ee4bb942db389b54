//! Statement operation domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of statement operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Deposit: increases the balance.
    Credit,
    /// Withdrawal: decreases the balance.
    Debit,
}

impl OperationType {
    /// Calculates the balance change for an operation of this type.
    ///
    /// Credit → balance += amount, Debit → balance -= amount.
    #[must_use]
    pub fn balance_change(self, amount: Decimal) -> Decimal {
        match self {
            Self::Credit => amount,
            Self::Debit => -amount,
        }
    }
}

/// A single entry in an account statement.
///
/// Operations are created by the ledger at append time and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Credit or debit.
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Append time.
    pub created_at: DateTime<Utc>,
}

impl Operation {
    /// Returns the signed amount (positive for credit, negative for debit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.operation_type.balance_change(self.amount)
    }
}
