//! In-memory account store.
//!
//! Owns every live account, keyed by id and by tax identifier. The whole
//! collection sits behind one `RwLock`: `create` and `delete` take it for
//! writing, so the uniqueness check and the balance-check-then-remove are
//! atomic. Lock order is collection first, then account.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use finapi_shared::types::AccountId;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::error::AccountError;
use super::types::{Account, AccountHandle, TaxId};

/// Source of fresh account identifiers.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Returns an identifier never returned before.
    fn next_id(&self) -> AccountId;
}

/// Time-ordered UUID v7 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> AccountId {
        AccountId::generate()
    }
}

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<AccountId, AccountHandle>,
    by_tax_id: HashMap<TaxId, AccountId>,
    /// Creation order of live accounts.
    order: Vec<AccountId>,
}

impl Accounts {
    fn snapshots(&self) -> Vec<Account> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .map(AccountHandle::snapshot)
            .collect()
    }
}

/// Account store for the process lifetime.
#[derive(Debug)]
pub struct AccountStore {
    ids: Box<dyn IdGenerator>,
    accounts: RwLock<Accounts>,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore {
    /// Creates an empty store issuing UUID v7 identifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(UuidV7Generator)
    }

    /// Creates an empty store with a custom identifier source.
    #[must_use]
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            ids: Box::new(ids),
            accounts: RwLock::new(Accounts::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Accounts> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Accounts> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an account with an empty statement.
    ///
    /// Creation is fire-and-forget: callers look the account up again if
    /// they need it.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if a live account already uses `tax_id`.
    pub fn create(&self, tax_id: TaxId, name: impl Into<String>) -> Result<(), AccountError> {
        let mut accounts = self.write();

        if accounts.by_tax_id.contains_key(&tax_id) {
            warn!(tax_id = %tax_id.masked(), "rejected duplicate account");
            return Err(AccountError::AlreadyExists(tax_id));
        }

        let id = self.ids.next_id();
        let handle = AccountHandle::new(id, tax_id.clone(), name.into());

        info!(account_id = %id, tax_id = %tax_id.masked(), "account created");

        accounts.by_tax_id.insert(tax_id, id);
        accounts.by_id.insert(id, handle);
        accounts.order.push(id);
        Ok(())
    }

    /// Resolves a credential to an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live account has exactly this tax identifier.
    pub fn find_by_tax_id(&self, tax_id: &str) -> Result<AccountHandle, AccountError> {
        let accounts = self.read();
        accounts
            .by_tax_id
            .get(&TaxId::from(tax_id))
            .and_then(|id| accounts.by_id.get(id))
            .cloned()
            .ok_or(AccountError::NotFound)
    }

    /// Looks an account up by id.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no live account has this id.
    pub fn find_by_id(&self, id: AccountId) -> Result<AccountHandle, AccountError> {
        self.read()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(AccountError::AccountNotFound(id))
    }

    /// Replaces the display name. Id and tax identifier never change.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account was deleted meanwhile.
    pub fn rename(&self, account: &AccountHandle, new_name: impl Into<String>) -> Result<(), AccountError> {
        let mut state = account.lock();
        if state.closed {
            return Err(AccountError::AccountNotFound(account.id()));
        }
        state.name = new_name.into();
        Ok(())
    }

    /// Deletes the account named by `account_id` on behalf of the
    /// authenticated `account`.
    ///
    /// Returns the remaining accounts in creation order.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no live account has `account_id`
    /// - `AccountMismatch` if `account_id` is not the authenticated account
    /// - `NonZeroBalance` if the balance is not exactly zero
    pub fn delete(
        &self,
        account_id: AccountId,
        account: &AccountHandle,
    ) -> Result<Vec<Account>, AccountError> {
        let mut accounts = self.write();

        let Some(target) = accounts.by_id.get(&account_id).cloned() else {
            return Err(AccountError::AccountNotFound(account_id));
        };

        if !target.same_account(account) {
            warn!(
                requested = %account_id,
                authenticated = %account.id(),
                "rejected deletion of another customer's account"
            );
            return Err(AccountError::AccountMismatch {
                requested: account_id,
                authenticated: account.id(),
            });
        }

        {
            let mut state = target.lock();
            let balance = state.statement.balance();
            if balance != Decimal::ZERO {
                return Err(AccountError::NonZeroBalance(balance));
            }
            state.closed = true;
        }

        accounts.by_id.remove(&account_id);
        accounts.by_tax_id.remove(target.tax_id());
        accounts.order.retain(|id| *id != account_id);

        info!(account_id = %account_id, remaining = accounts.order.len(), "account deleted");

        Ok(accounts.snapshots())
    }

    /// All live accounts in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<Account> {
        self.read().snapshots()
    }

    /// Number of live accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Returns true if there are no live accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
