//! Append-only account statement.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::balance::fold_balance;
use super::operation::Operation;
use crate::clock::ReferenceZone;

/// Ordered operations of one account plus the running balance.
///
/// Insertion order is chronological order. Operations can only be added,
/// and only from inside the crate (the ledger holds the account lock while
/// doing so).
#[derive(Debug, Clone, Default)]
pub struct Statement {
    operations: Vec<Operation>,
    balance: Decimal,
}

impl Statement {
    /// Creates an empty statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation and updates the running balance.
    ///
    /// Returns the new balance, or `None` without appending if the balance
    /// would leave the representable range.
    #[must_use]
    pub(crate) fn push(&mut self, operation: Operation) -> Option<Decimal> {
        let balance = self.balance.checked_add(operation.signed_amount())?;
        self.balance = balance;
        self.operations.push(operation);
        Some(balance)
    }

    /// Current balance, maintained incrementally.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Balance recomputed by folding every operation.
    ///
    /// Always equal to [`Statement::balance`].
    #[must_use]
    pub fn recompute_balance(&self) -> Decimal {
        fold_balance(&self.operations)
    }

    /// All operations in insertion order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if no operation was ever appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operations whose timestamp falls on `date` in `zone`, in insertion order.
    #[must_use]
    pub fn on_date(&self, date: NaiveDate, zone: ReferenceZone) -> Vec<Operation> {
        self.operations
            .iter()
            .filter(|op| zone.date_of(op.created_at) == date)
            .cloned()
            .collect()
    }
}
