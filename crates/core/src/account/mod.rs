//! Customer accounts.
//!
//! This module implements account identity and the account store:
//! - Tax identifiers and account handles
//! - Creation with a uniqueness check
//! - Credential resolution by tax identifier
//! - Rename and zero-balance deletion

pub mod error;
pub mod store;
pub mod types;

pub use error::AccountError;
pub use store::{AccountStore, IdGenerator, UuidV7Generator};
pub use types::{Account, AccountHandle, TaxId};
