//! Financial statement routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use ponmo_core::reports::StatementService;

use crate::AppState;
use crate::routes::ledger_error_response;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/trial-balance", get(get_trial_balance))
        .route("/reports/balance-sheet", get(get_balance_sheet))
        .route("/reports/income-statement", get(get_income_statement))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for point-in-time reports.
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    /// As of date (defaults to today).
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for period reports.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Start date (defaults to the epoch).
    pub from: Option<NaiveDate>,
    /// End date (defaults to today).
    pub to: Option<NaiveDate>,
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/reports/trial-balance` - Per-account debit/credit totals.
async fn get_trial_balance(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    let as_of = query.as_of.unwrap_or_else(today);

    match StatementService::trial_balance(&state.ledger, as_of) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/reports/balance-sheet` - Assets, liabilities, and equity.
async fn get_balance_sheet(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    let as_of = query.as_of.unwrap_or_else(today);

    match StatementService::balance_sheet(&state.ledger, as_of) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/reports/income-statement` - Revenue, COGS, and expenses over a period.
async fn get_income_statement(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(NaiveDate::MIN);
    let to = query.to.unwrap_or_else(today);

    match StatementService::income_statement(&state.ledger, from, to) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}
