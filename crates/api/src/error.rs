//! Mapping of domain failures to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use finapi_core::{AccountError, LedgerError};
use finapi_shared::AppError;

/// Any failure a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Account store failure.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Ledger failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Malformed request or unknown route.
    #[error(transparent)]
    App(#[from] AppError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::Account(e) => e.http_status_code(),
            Self::Ledger(e) => e.http_status_code(),
            Self::App(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Account(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
            Self::App(e) => e.error_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();
        warn!(error = code, status = status.as_u16(), "request rejected");

        (
            status,
            Json(json!({
                "error": code,
                "message": self.to_string()
            })),
        )
            .into_response()
    }
}
