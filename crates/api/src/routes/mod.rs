//! API route definitions.

use axum::{Router, http::Uri};

use crate::{AppState, error::ApiError};
use finapi_shared::AppError;

pub mod accounts;
pub mod health;
pub mod statement;

/// Creates the API router with all routes.
///
/// Protected handlers take an [`AuthAccount`](crate::middleware::AuthAccount)
/// argument, so credential resolution happens per handler rather than in a
/// layer.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(statement::routes())
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(format!("no route for {}", uri.path())).into()
}
