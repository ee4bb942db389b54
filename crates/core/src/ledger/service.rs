//! Ledger service: appends and queries on an account's statement.
//!
//! Every operation takes the account handle resolved by the caller and holds
//! that account's lock for its whole duration. A withdrawal reads the
//! balance, decides, and appends under one lock acquisition.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::balance::covers;
use super::error::LedgerError;
use super::operation::{Operation, OperationType};
use crate::account::AccountHandle;
use crate::clock::{Clock, ReferenceZone, SystemClock};

/// Ledger service.
///
/// Holds no account state itself; it stamps operations with the injected
/// clock and resolves calendar days in its reference zone.
#[derive(Debug, Clone)]
pub struct Ledger {
    clock: Arc<dyn Clock>,
    zone: ReferenceZone,
}

impl Ledger {
    /// Creates a ledger with the given time source and reference zone.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, zone: ReferenceZone) -> Self {
        Self { clock, zone }
    }

    /// Wall-clock time, process-local calendar days.
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), ReferenceZone::Local)
    }

    /// Zone used by [`Ledger::statement_on`].
    #[must_use]
    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Appends an operation stamped with the current time.
    ///
    /// Debits are only appended when the balance covers them.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `amount < 0`
    /// - `AccountClosed` if the account was deleted
    /// - `InsufficientFunds` for a debit larger than the balance
    /// - `AmountOverflow` if a credit would exceed the largest representable
    ///   balance
    pub fn append(
        &self,
        account: &AccountHandle,
        operation_type: OperationType,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Operation, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        let mut state = account.lock();
        if state.closed {
            return Err(LedgerError::AccountClosed(account.id()));
        }

        let balance = state.statement.balance();
        if operation_type == OperationType::Debit && !covers(balance, amount) {
            debug!(account_id = %account.id(), %balance, requested = %amount, "insufficient funds");
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        let operation = Operation {
            operation_type,
            amount,
            description,
            created_at: self.clock.now(),
        };
        let Some(new_balance) = state.statement.push(operation.clone()) else {
            warn!(account_id = %account.id(), %balance, requested = %amount, "balance overflow");
            return Err(LedgerError::AmountOverflow {
                balance,
                requested: amount,
            });
        };

        debug!(
            account_id = %account.id(),
            operation = ?operation_type,
            %amount,
            balance = %new_balance,
            "operation appended"
        );
        Ok(operation)
    }

    /// Records a deposit (credit). No limit is imposed beyond the
    /// representable range of the balance.
    ///
    /// # Errors
    ///
    /// See [`Ledger::append`].
    pub fn deposit(
        &self,
        account: &AccountHandle,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Operation, LedgerError> {
        self.append(account, OperationType::Credit, amount, description)
    }

    /// Records a withdrawal (debit) if the balance covers it.
    ///
    /// On failure the statement is left untouched.
    ///
    /// # Errors
    ///
    /// See [`Ledger::append`].
    pub fn withdraw(
        &self,
        account: &AccountHandle,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Operation, LedgerError> {
        self.append(account, OperationType::Debit, amount, description)
    }

    /// Credits minus debits.
    #[must_use]
    pub fn balance(&self, account: &AccountHandle) -> Decimal {
        account.lock().statement.balance()
    }

    /// The whole statement, oldest first.
    #[must_use]
    pub fn full_statement(&self, account: &AccountHandle) -> Vec<Operation> {
        account.lock().statement.operations().to_vec()
    }

    /// Operations recorded on `date` in the reference zone, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NoOperationsThatDay` if nothing was recorded that day.
    pub fn statement_on(
        &self,
        account: &AccountHandle,
        date: NaiveDate,
    ) -> Result<Vec<Operation>, LedgerError> {
        let operations = account.lock().statement.on_date(date, self.zone);
        if operations.is_empty() {
            return Err(LedgerError::NoOperationsThatDay(date));
        }
        Ok(operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountStore, TaxId};
    use crate::clock::ManualClock;
    use chrono::{TimeDelta, TimeZone, Utc};
    use chrono_tz::Tz;
    use rust_decimal_macros::dec;
    use std::thread;

    struct Fixture {
        store: AccountStore,
        clock: Arc<ManualClock>,
        ledger: Ledger,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        ));
        let ledger = Ledger::new(clock.clone(), ReferenceZone::Named(Tz::UTC));
        Fixture {
            store: AccountStore::new(),
            clock,
            ledger,
        }
    }

    fn account(f: &Fixture, tax_id: &str) -> AccountHandle {
        f.store.create(TaxId::from(tax_id), "Test").unwrap();
        f.store.find_by_tax_id(tax_id).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_alice_scenario() {
        let f = fixture();
        f.store.create(TaxId::from("111"), "Alice").unwrap();
        let alice = f.store.find_by_tax_id("111").unwrap();

        f.ledger.deposit(&alice, dec!(100), Some("salary".into())).unwrap();
        assert_eq!(f.ledger.balance(&alice), dec!(100));

        let err = f.ledger.withdraw(&alice, dec!(150), None).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: dec!(100),
                requested: dec!(150),
            }
        );
        assert_eq!(f.ledger.balance(&alice), dec!(100));
        assert_eq!(f.ledger.full_statement(&alice).len(), 1);

        f.ledger.withdraw(&alice, dec!(100), None).unwrap();
        assert_eq!(f.ledger.balance(&alice), Decimal::ZERO);

        assert!(f.store.delete(alice.id(), &alice).unwrap().is_empty());
    }

    #[test]
    fn test_append_stamps_clock_time() {
        let f = fixture();
        let a = account(&f, "1");

        let op = f.ledger.deposit(&a, dec!(10), None).unwrap();
        assert_eq!(op.created_at, f.clock.now());
        assert_eq!(op.operation_type, OperationType::Credit);
        assert_eq!(f.ledger.full_statement(&a), vec![op]);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let f = fixture();
        let a = account(&f, "1");

        assert_eq!(
            f.ledger.deposit(&a, dec!(-5), None).unwrap_err(),
            LedgerError::NegativeAmount
        );
        assert_eq!(
            f.ledger.withdraw(&a, dec!(-5), None).unwrap_err(),
            LedgerError::NegativeAmount
        );
        assert!(f.ledger.full_statement(&a).is_empty());
    }

    #[test]
    fn test_zero_amounts_are_accepted() {
        let f = fixture();
        let a = account(&f, "1");

        f.ledger.deposit(&a, Decimal::ZERO, None).unwrap();
        f.ledger.withdraw(&a, Decimal::ZERO, None).unwrap();
        assert_eq!(f.ledger.full_statement(&a).len(), 2);
        assert_eq!(f.ledger.balance(&a), Decimal::ZERO);
    }

    #[test]
    fn test_description_is_optional_for_both_types() {
        let f = fixture();
        let a = account(&f, "1");

        let credit = f.ledger.deposit(&a, dec!(10), None).unwrap();
        let debit = f.ledger.withdraw(&a, dec!(5), Some("rent".into())).unwrap();
        assert_eq!(credit.description, None);
        assert_eq!(debit.description.as_deref(), Some("rent"));
    }

    #[test]
    fn test_deposit_past_representable_balance_is_rejected() {
        let f = fixture();
        let a = account(&f, "1");
        f.ledger.deposit(&a, Decimal::MAX, None).unwrap();

        assert_eq!(
            f.ledger.deposit(&a, dec!(1), None).unwrap_err(),
            LedgerError::AmountOverflow {
                balance: Decimal::MAX,
                requested: dec!(1),
            }
        );
        assert_eq!(f.ledger.full_statement(&a).len(), 1);
        assert_eq!(f.ledger.balance(&a), Decimal::MAX);

        // Debits still work from the top of the range.
        f.ledger.withdraw(&a, dec!(1), None).unwrap();
        f.ledger.deposit(&a, dec!(1), None).unwrap();
        assert_eq!(f.ledger.balance(&a), Decimal::MAX);
    }

    #[test]
    fn test_statement_on_returns_that_day_in_order() {
        let f = fixture();
        let a = account(&f, "1");

        f.ledger.deposit(&a, dec!(1), None).unwrap();
        f.clock.advance(TimeDelta::hours(1));
        f.ledger.deposit(&a, dec!(2), None).unwrap();
        f.clock.advance(TimeDelta::days(1));
        f.ledger.withdraw(&a, dec!(3), None).unwrap();

        let on_15: Vec<_> = f
            .ledger
            .statement_on(&a, day(15))
            .unwrap()
            .into_iter()
            .map(|o| o.amount)
            .collect();
        assert_eq!(on_15, vec![dec!(1), dec!(2)]);

        let on_16 = f.ledger.statement_on(&a, day(16)).unwrap();
        assert_eq!(on_16.len(), 1);
        assert_eq!(on_16[0].operation_type, OperationType::Debit);

        assert_eq!(
            f.ledger.statement_on(&a, day(17)).unwrap_err(),
            LedgerError::NoOperationsThatDay(day(17))
        );
    }

    #[test]
    fn test_empty_statement_has_no_operations_any_day() {
        let f = fixture();
        let a = account(&f, "1");
        assert_eq!(
            f.ledger.statement_on(&a, day(15)).unwrap_err(),
            LedgerError::NoOperationsThatDay(day(15))
        );
    }

    #[test]
    fn test_closed_account_rejects_appends() {
        let f = fixture();
        let a = account(&f, "1");
        f.store.delete(a.id(), &a).unwrap();

        assert_eq!(
            f.ledger.deposit(&a, dec!(1), None).unwrap_err(),
            LedgerError::AccountClosed(a.id())
        );
    }

    #[test]
    fn test_concurrent_withdrawals_never_overdraw() {
        let f = fixture();
        let a = account(&f, "1");
        f.ledger.deposit(&a, dec!(100), None).unwrap();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let ledger = f.ledger.clone();
                let a = a.clone();
                thread::spawn(move || ledger.withdraw(&a, dec!(10), None))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 10);
        assert_eq!(f.ledger.balance(&a), Decimal::ZERO);
    }
}
