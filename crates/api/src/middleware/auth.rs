//! Credential resolution for protected routes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{AppState, error::ApiError};
use finapi_core::{AccountError, AccountHandle};

/// The account resolved from the request's credential header.
///
/// Use this in handlers and pass the handle on explicitly:
///
/// ```ignore
/// async fn handler(State(state): State<AppState>, AuthAccount(account): AuthAccount) {
///     let balance = state.ledger.balance(&account);
///     // ...
/// }
/// ```
///
/// A missing, non-UTF-8, or unknown tax identifier is rejected with
/// `CUSTOMER_NOT_FOUND` before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthAccount(pub AccountHandle);

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let tax_id = parts
            .headers
            .get(&state.credential_header)
            .and_then(|h| h.to_str().ok())
            .ok_or(AccountError::NotFound)?;

        let account = state.store.find_by_tax_id(tax_id)?;
        Ok(Self(account))
    }
}
