//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use ponmo_core::ledger::LedgerError;
use ponmo_shared::AppError;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod accounts;
pub mod entries;
pub mod health;
pub mod reports;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(accounts::routes())
        .merge(entries::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new().merge(health::routes()).merge(protected_routes)
}

/// Maps a ledger error to a JSON error response.
///
/// Integrity and storage errors are logged; validation errors are the
/// caller's problem and go straight back out.
pub(crate) fn ledger_error_response(err: &LedgerError) -> Response {
    if err.http_status_code() >= 500 {
        error!(error = %err, code = err.error_code(), "Ledger operation failed");
    }

    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
            "retryable": err.is_retryable(),
        })),
    )
        .into_response()
}

/// Maps an application-level error (parse failures, missing resources)
/// to a JSON error response.
pub(crate) fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
            "retryable": err.is_retryable(),
        })),
    )
        .into_response()
}
