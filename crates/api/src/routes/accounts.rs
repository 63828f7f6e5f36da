//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use ponmo_core::accounts::{Account, AccountCategory, AccountCode};
use ponmo_shared::AppError;
use ponmo_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::routes::{app_error_response, ledger_error_response};

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{code}", get(get_account))
        .route("/accounts/{code}/balance", get(get_balance))
        .route("/accounts/{code}/ledger", get(get_account_ledger))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a chart account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account code.
    pub code: u16,
    /// Account name.
    pub name: String,
    /// Account class.
    pub class: String,
    /// Statement category.
    pub category: String,
}

fn category_to_string(category: AccountCategory) -> &'static str {
    match category {
        AccountCategory::CurrentAsset => "current_asset",
        AccountCategory::FixedAsset => "fixed_asset",
        AccountCategory::CurrentLiability => "current_liability",
        AccountCategory::LongTermLiability => "long_term_liability",
        AccountCategory::OwnerEquity => "owner_equity",
        AccountCategory::OperatingRevenue => "operating_revenue",
        AccountCategory::CostOfGoodsSold => "cost_of_goods_sold",
        AccountCategory::OperatingExpense => "operating_expense",
    }
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            code: account.code.value(),
            name: account.name.clone(),
            class: account.class.to_string(),
            category: category_to_string(account.category).to_string(),
        }
    }
}

/// Query parameters for an account balance.
#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    /// As of date (defaults to today).
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for an account ledger.
#[derive(Debug, Deserialize)]
pub struct AccountLedgerQuery {
    /// Start date.
    pub from: Option<NaiveDate>,
    /// End date.
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// One row of an account's ledger.
#[derive(Debug, Serialize)]
pub struct PostingResponse {
    /// Parent entry id.
    pub entry_id: String,
    /// Business date.
    pub date: String,
    /// Entry description.
    pub description: String,
    /// Entry reference.
    pub reference: Option<String>,
    /// Entry source tag.
    pub source: String,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
    /// Line memo.
    pub memo: Option<String>,
    /// Balance after this line, in the account's normal-side sign.
    pub running_balance: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/accounts` - List the chart of accounts.
async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    let accounts: Vec<AccountResponse> =
        state.ledger.chart().iter().map(AccountResponse::from).collect();

    (StatusCode::OK, Json(json!({ "accounts": accounts })))
}

/// GET `/accounts/{code}` - Fetch one account.
async fn get_account(
    State(state): State<AppState>,
    Path(code): Path<u16>,
) -> impl IntoResponse {
    match state.ledger.chart().lookup(AccountCode(code)) {
        Ok(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Err(e) => app_error_response(&AppError::NotFound(e.to_string())),
    }
}

/// GET `/accounts/{code}/balance` - Signed balance as of a date.
async fn get_balance(
    State(state): State<AppState>,
    Path(code): Path<u16>,
    Query(query): Query<BalanceQuery>,
) -> impl IntoResponse {
    let as_of = query
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    match state.ledger.balance_as_of(AccountCode(code), as_of) {
        Ok(balance) => (
            StatusCode::OK,
            Json(json!({
                "code": code,
                "as_of": as_of.to_string(),
                "balance": balance.to_string(),
            })),
        )
            .into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/accounts/{code}/ledger` - The account's postings with running balance.
async fn get_account_ledger(
    State(state): State<AppState>,
    Path(code): Path<u16>,
    Query(query): Query<AccountLedgerQuery>,
) -> impl IntoResponse {
    let account = AccountCode(code);

    let class = match state.ledger.chart().classify(account) {
        Ok(class) => class,
        Err(e) => return app_error_response(&AppError::NotFound(e.to_string())),
    };

    let postings = match state.ledger.entries_for(account, query.from, query.to) {
        Ok(postings) => postings,
        Err(e) => return ledger_error_response(&e),
    };

    let page_request = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    // Running balance accumulates over the whole window before paging.
    let side = class.normal_balance();
    let mut running = rust_decimal::Decimal::ZERO;
    let rows: Vec<PostingResponse> = postings
        .iter()
        .map(|posting| {
            running += side.balance_change(posting.debit, posting.credit);
            PostingResponse {
                entry_id: posting.entry_id.to_string(),
                date: posting.date.to_string(),
                description: posting.description.clone(),
                reference: posting.reference.clone(),
                source: posting.source.to_string(),
                debit: posting.debit.to_string(),
                credit: posting.credit.to_string(),
                memo: posting.memo.clone(),
                running_balance: running.to_string(),
            }
        })
        .collect();

    let total = rows.len() as u64;
    let page: Vec<PostingResponse> = rows
        .into_iter()
        .skip(page_request.offset())
        .take(page_request.limit())
        .collect();

    (
        StatusCode::OK,
        Json(PageResponse::new(
            page,
            page_request.page,
            page_request.per_page,
            total,
        )),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::routes::entries::tests_support::{authed, test_router};

    #[tokio::test]
    async fn test_list_accounts_returns_chart() {
        let app = test_router();
        let response = app
            .oneshot(authed(Request::get("/api/v1/accounts")).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["accounts"].as_array().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_get_unknown_account_is_404() {
        let app = test_router();
        let response = app
            .oneshot(
                authed(Request::get("/api/v1/accounts/9999"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_balance_of_untouched_account_is_zero() {
        let app = test_router();
        let response = app
            .oneshot(
                authed(Request::get("/api/v1/accounts/1000/balance?as_of=2026-06-30"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["balance"], "0");
    }
}
