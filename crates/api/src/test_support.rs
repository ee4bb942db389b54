//! Helpers for driving the router in tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderName, Request, StatusCode, header::CONTENT_TYPE},
};
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};
use finapi_core::{AccountStore, Ledger, ManualClock, ReferenceZone};

/// Router state plus a handle on its clock.
pub(crate) struct TestApp {
    pub(crate) state: AppState,
    pub(crate) clock: Arc<ManualClock>,
}

/// State frozen at 2026-01-15 09:00 UTC, days resolved in UTC.
pub(crate) fn test_app() -> TestApp {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ));
    let state = AppState::new(
        Arc::new(AccountStore::new()),
        Ledger::new(clock.clone(), ReferenceZone::Named(Tz::UTC)),
        HeaderName::from_static("cpf"),
    );
    TestApp { state, clock }
}

impl TestApp {
    /// Sends one request and returns the status and the JSON body
    /// (`Value::Null` when the body is empty).
    pub(crate) async fn send(
        &self,
        method: &str,
        uri: &str,
        cpf: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cpf) = cpf {
            builder = builder.header("cpf", cpf);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = create_router(self.state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
