//! HTTP API layer with Axum routes and credential resolution.
//!
//! This crate provides:
//! - REST API routes
//! - The credential extractor resolving a tax identifier to an account
//! - Error-to-response mapping
//!
//! Security note: the tax identifier header is the only credential. Anyone
//! who knows a customer's tax identifier can act on the account.

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use axum::{Router, http::HeaderName};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use finapi_core::{AccountStore, Ledger, ReferenceZone, SystemClock};
use finapi_shared::AppConfig;

pub use error::ApiError;

/// Errors building the application state from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    /// `auth.credential_header` is not a valid header name.
    #[error("invalid credential header {0:?}")]
    InvalidCredentialHeader(String),

    /// `ledger.timezone` is not a known IANA zone.
    #[error("invalid ledger timezone {0:?}")]
    InvalidTimezone(String),
}

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every live account.
    pub store: Arc<AccountStore>,
    /// Ledger service.
    pub ledger: Ledger,
    /// Header carrying the tax identifier.
    pub credential_header: HeaderName,
}

impl AppState {
    /// Creates state from its parts.
    #[must_use]
    pub fn new(store: Arc<AccountStore>, ledger: Ledger, credential_header: HeaderName) -> Self {
        Self {
            store,
            ledger,
            credential_header,
        }
    }

    /// Creates an empty store and a wall-clock ledger from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential header or time zone is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let header = &config.auth.credential_header;
        let credential_header = HeaderName::try_from(header.as_str())
            .map_err(|_| SetupError::InvalidCredentialHeader(header.clone()))?;

        let timezone = config.ledger.timezone.as_deref();
        let zone = ReferenceZone::from_config(timezone)
            .map_err(|_| SetupError::InvalidTimezone(timezone.unwrap_or_default().to_string()))?;

        Ok(Self::new(
            Arc::new(AccountStore::new()),
            Ledger::new(Arc::new(SystemClock), zone),
            credential_header,
        ))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
