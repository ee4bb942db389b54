//! Statement, balance, deposit, and withdrawal routes.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, middleware::AuthAccount};
use finapi_core::Operation;
use finapi_shared::AppError;

/// Creates the statement routes. All of them require a credential.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/statement", get(get_statement))
        .route("/statement/date", get(get_statement_by_date))
        .route("/balance", get(get_balance))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
}

/// Request body for a deposit.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    /// Optional description.
    pub description: Option<String>,
    /// Amount to credit.
    pub amount: Decimal,
}

/// Request body for a withdrawal.
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    /// Amount to debit.
    pub amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Query parameters for the by-date statement.
#[derive(Debug, Deserialize)]
pub struct StatementDateQuery {
    /// Calendar day (YYYY-MM-DD format).
    pub date: NaiveDate,
}

/// Response for the balance.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Credits minus debits, as an exact decimal string.
    pub balance: Decimal,
}

/// GET `/statement` - Every operation, oldest first.
async fn get_statement(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Json<Vec<Operation>> {
    Json(state.ledger.full_statement(&account))
}

/// GET `/statement/date?date=YYYY-MM-DD` - Operations of one calendar day.
async fn get_statement_by_date(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    query: Result<Query<StatementDateQuery>, QueryRejection>,
) -> Result<Json<Vec<Operation>>, ApiError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let operations = state.ledger.statement_on(&account, query.date)?;
    Ok(Json(operations))
}

/// GET `/balance` - Current balance.
async fn get_balance(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        balance: state.ledger.balance(&account),
    })
}

/// POST `/deposit` - Credit the account.
async fn deposit(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    state
        .ledger
        .deposit(&account, payload.amount, payload.description)?;
    Ok(StatusCode::CREATED)
}

/// POST `/withdraw` - Debit the account if the balance covers it.
async fn withdraw(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    payload: Result<Json<WithdrawRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    state
        .ledger
        .withdraw(&account, payload.amount, payload.description)?;
    Ok(StatusCode::CREATED)
}
