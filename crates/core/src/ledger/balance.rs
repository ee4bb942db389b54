//! Balance calculations.
//!
//! The balance of a statement is a left fold starting at zero: credits add
//! their amount, debits subtract it. The fold itself does not enforce a
//! non-negative result; the withdrawal guard in the ledger does.

use rust_decimal::Decimal;

use super::operation::Operation;

/// Folds a sequence of operations into a signed balance.
#[must_use]
pub fn fold_balance<'a, I>(operations: I) -> Decimal
where
    I: IntoIterator<Item = &'a Operation>,
{
    operations
        .into_iter()
        .fold(Decimal::ZERO, |acc, op| acc + op.signed_amount())
}

/// Returns true if `balance` covers a withdrawal of `amount`.
#[must_use]
pub fn covers(balance: Decimal, amount: Decimal) -> bool {
    balance >= amount
}
