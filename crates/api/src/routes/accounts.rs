//! Account management routes.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, middleware::AuthAccount};
use finapi_core::{Account, Operation, TaxId};
use finapi_shared::{AppError, types::AccountId};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/account",
            get(get_account).post(create_account).put(rename_account),
        )
        .route("/account/{id}", delete(delete_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Tax identifier (unique).
    pub cpf: String,
    /// Display name.
    pub name: String,
}

/// Request body for renaming an account.
#[derive(Debug, Deserialize)]
pub struct RenameAccountRequest {
    /// New display name.
    pub name: String,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Tax identifier.
    pub cpf: String,
    /// Display name.
    pub name: String,
    /// Every operation, oldest first.
    pub statement: Vec<Operation>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            cpf: account.tax_id.to_string(),
            name: account.name,
            statement: account.statement,
        }
    }
}

/// POST `/account` - Create an account. No body on success.
async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    state.store.create(TaxId::from(payload.cpf), payload.name)?;
    Ok(StatusCode::CREATED)
}

/// GET `/account` - The authenticated account, statement included.
async fn get_account(AuthAccount(account): AuthAccount) -> Json<AccountResponse> {
    Json(account.snapshot().into())
}

/// PUT `/account` - Rename the authenticated account.
async fn rename_account(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    payload: Result<Json<RenameAccountRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    state.store.rename(&account, payload.name)?;
    Ok(StatusCode::CREATED)
}

/// DELETE `/account/{id}` - Delete the authenticated account if its balance
/// is zero. Responds with the remaining accounts.
async fn delete_account(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    id: Result<Path<AccountId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| AppError::Validation(e.body_text()))?;

    let remaining: Vec<AccountResponse> = state
        .store
        .delete(id, &account)?
        .into_iter()
        .map(AccountResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(remaining)))
}
