//! Property-based tests for the ledger service.
//!
//! - Deposits sum to the balance
//! - Withdrawals succeed exactly when covered, and failures leave no trace
//! - The running balance always equals the full fold
//! - Day filtering partitions the statement

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::operation::OperationType;
use super::service::Ledger;
use crate::account::{AccountHandle, AccountStore, TaxId};
use crate::clock::{ManualClock, ReferenceZone};

/// Strategy to generate non-negative amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate operation types.
fn operation_type() -> impl Strategy<Value = OperationType> {
    prop_oneof![Just(OperationType::Credit), Just(OperationType::Debit)]
}

fn setup() -> (AccountStore, Arc<ManualClock>, Ledger, AccountHandle) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    ));
    let ledger = Ledger::new(clock.clone(), ReferenceZone::Named(Tz::UTC));
    let store = AccountStore::new();
    store.create(TaxId::from("111"), "Alice").unwrap();
    let account = store.find_by_tax_id("111").unwrap();
    (store, clock, ledger, account)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any sequence of deposits d1..dn, balance == sum(d1..dn).
    #[test]
    fn prop_deposits_sum_to_balance(deposits in prop::collection::vec(amount(), 0..30)) {
        let (_store, _clock, ledger, account) = setup();
        for d in &deposits {
            ledger.deposit(&account, *d, None).unwrap();
        }
        let expected: Decimal = deposits.iter().copied().sum();
        prop_assert_eq!(ledger.balance(&account), expected);
    }

    /// Withdraw succeeds iff amount <= balance; success lowers the balance by
    /// exactly amount, failure leaves the statement unchanged.
    #[test]
    fn prop_withdraw_succeeds_iff_covered(deposit in amount(), withdrawal in amount()) {
        let (_store, _clock, ledger, account) = setup();
        ledger.deposit(&account, deposit, None).unwrap();
        let before = ledger.full_statement(&account);

        match ledger.withdraw(&account, withdrawal, None) {
            Ok(_) => {
                prop_assert!(withdrawal <= deposit);
                prop_assert_eq!(ledger.balance(&account), deposit - withdrawal);
            }
            Err(err) => {
                prop_assert!(withdrawal > deposit);
                prop_assert_eq!(
                    err,
                    LedgerError::InsufficientFunds { balance: deposit, requested: withdrawal }
                );
                prop_assert_eq!(ledger.full_statement(&account), before);
            }
        }
    }

    /// Balance never goes negative and always matches the full fold.
    #[test]
    fn prop_running_balance_matches_fold(
        ops in prop::collection::vec((operation_type(), amount()), 0..40),
    ) {
        let (_store, _clock, ledger, account) = setup();
        for (kind, amount) in ops {
            let _ = ledger.append(&account, kind, amount, None);
            let state = account.lock();
            prop_assert!(state.statement.balance() >= Decimal::ZERO);
            prop_assert_eq!(state.statement.balance(), state.statement.recompute_balance());
        }
    }

    /// Every operation lands on exactly one day, in insertion order.
    #[test]
    fn prop_days_partition_statement(gaps_in_hours in prop::collection::vec(0i64..30, 1..20)) {
        let (_store, clock, ledger, account) = setup();
        for gap in &gaps_in_hours {
            clock.advance(TimeDelta::hours(*gap));
            ledger.deposit(&account, Decimal::ONE, None).unwrap();
        }

        let full = ledger.full_statement(&account);
        let first = full[0].created_at.date_naive();
        let last = full[full.len() - 1].created_at.date_naive();

        let mut rebuilt = Vec::new();
        let mut day: NaiveDate = first;
        while day <= last {
            match ledger.statement_on(&account, day) {
                Ok(ops) => {
                    prop_assert!(ops.iter().all(|o| o.created_at.date_naive() == day));
                    rebuilt.extend(ops);
                }
                Err(err) => prop_assert_eq!(err, LedgerError::NoOperationsThatDay(day)),
            }
            day = day.succ_opt().unwrap();
        }
        prop_assert_eq!(rebuilt, full);
    }
}
