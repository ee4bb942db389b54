//! Account domain types.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use finapi_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use crate::ledger::{Operation, Statement};

/// Client-supplied natural key of an account.
///
/// Unique across live accounts and used as the request credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Wraps a raw tax identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a form safe for logs: everything but the last 3 characters
    /// replaced by `*`.
    #[must_use]
    pub fn masked(&self) -> String {
        let count = self.0.chars().count();
        let keep = count.min(3);
        let hidden = "*".repeat(count - keep);
        let tail: String = self.0.chars().skip(count - keep).collect();
        format!("{hidden}{tail}")
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaxId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaxId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Point-in-time copy of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Immutable identifier.
    pub id: AccountId,
    /// Immutable natural key.
    pub tax_id: TaxId,
    /// Display name.
    pub name: String,
    /// Every operation, oldest first.
    pub statement: Vec<Operation>,
}

/// Mutable part of an account, guarded by the account lock.
#[derive(Debug)]
pub(crate) struct AccountState {
    pub(crate) name: String,
    pub(crate) statement: Statement,
    /// Set when the account is removed from the store.
    pub(crate) closed: bool,
}

#[derive(Debug)]
struct AccountCell {
    id: AccountId,
    tax_id: TaxId,
    state: Mutex<AccountState>,
}

/// Shared reference to a live account.
///
/// Handed out by the store after credential resolution and passed explicitly
/// to ledger operations. Identity fields are readable without locking and
/// cannot be changed.
#[derive(Debug, Clone)]
pub struct AccountHandle {
    inner: Arc<AccountCell>,
}

impl AccountHandle {
    pub(crate) fn new(id: AccountId, tax_id: TaxId, name: String) -> Self {
        Self {
            inner: Arc::new(AccountCell {
                id,
                tax_id,
                state: Mutex::new(AccountState {
                    name,
                    statement: Statement::new(),
                    closed: false,
                }),
            }),
        }
    }

    /// Account identifier.
    #[must_use]
    pub fn id(&self) -> AccountId {
        self.inner.id
    }

    /// Account tax identifier.
    #[must_use]
    pub fn tax_id(&self) -> &TaxId {
        &self.inner.tax_id
    }

    /// Current display name.
    #[must_use]
    pub fn name(&self) -> String {
        self.lock().name.clone()
    }

    /// Returns true once the account has been deleted from the store.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Copies the account, statement included.
    #[must_use]
    pub fn snapshot(&self) -> Account {
        let state = self.lock();
        Account {
            id: self.inner.id,
            tax_id: self.inner.tax_id.clone(),
            name: state.name.clone(),
            statement: state.statement.operations().to_vec(),
        }
    }

    /// Returns true if both handles refer to the same account.
    #[must_use]
    pub fn same_account(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Locks the mutable state. A poisoned lock is recovered: every writer
    /// leaves the state consistent before it can panic.
    pub(crate) fn lock(&self) -> MutexGuard<'_, AccountState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
