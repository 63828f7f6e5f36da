//! Journal entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use ponmo_core::accounts::AccountCode;
use ponmo_core::ledger::{EntryDraft, EntryFilter, JournalEntry, LineItem, SourceType};
use ponmo_shared::types::{EntryId, PageRequest, PageResponse};

use ponmo_shared::AppError;

use crate::AppState;
use crate::middleware::AuthUser;
use crate::routes::{app_error_response, ledger_error_response};

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries))
        .route("/entries", post(create_entry))
        .route("/entries/{entry_id}", get(get_entry))
        .route("/entries/{entry_id}/reverse", post(reverse_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Filter by account code.
    pub account: Option<u16>,
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Filter by source tag.
    pub source: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating an entry.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Business date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Source tag (sale, purchase, production, expense, payment, deposit,
    /// adjustment).
    pub source: String,
    /// Optional reference number.
    pub reference: Option<String>,
    /// Optional idempotency key; retried posts with the same key return
    /// the original entry id.
    pub idempotency_key: Option<String>,
    /// The debit/credit lines.
    pub lines: Vec<CreateLineRequest>,
}

/// Request body for a single line.
#[derive(Debug, Deserialize)]
pub struct CreateLineRequest {
    /// Account code.
    pub account: u16,
    /// Debit amount as a decimal string (omit for credit lines).
    pub debit: Option<String>,
    /// Credit amount as a decimal string (omit for debit lines).
    pub credit: Option<String>,
    /// Optional memo.
    pub memo: Option<String>,
}

/// Response for a journal entry.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry id.
    pub id: String,
    /// Business date.
    pub date: String,
    /// Posting timestamp.
    pub posted_at: String,
    /// Description.
    pub description: String,
    /// Reference number.
    pub reference: Option<String>,
    /// Source tag.
    pub source: String,
    /// The entry this one reverses, if any.
    pub reverses: Option<String>,
    /// Lines.
    pub lines: Vec<LineResponse>,
    /// Total debits.
    pub total_debit: String,
    /// Total credits.
    pub total_credit: String,
}

/// Response for a single line.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Account code.
    pub account: u16,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
    /// Memo.
    pub memo: Option<String>,
}

impl From<&JournalEntry> for EntryResponse {
    fn from(entry: &JournalEntry) -> Self {
        let (total_debit, total_credit) = entry.totals();
        Self {
            id: entry.id.to_string(),
            date: entry.date.to_string(),
            posted_at: entry.posted_at.to_rfc3339(),
            description: entry.description.clone(),
            reference: entry.reference.clone(),
            source: entry.source.to_string(),
            reverses: entry.reverses.map(|id| id.to_string()),
            lines: entry
                .lines
                .iter()
                .map(|line| LineResponse {
                    account: line.account.value(),
                    debit: line.debit.to_string(),
                    credit: line.credit.to_string(),
                    memo: line.memo.clone(),
                })
                .collect(),
            total_debit: total_debit.to_string(),
            total_credit: total_credit.to_string(),
        }
    }
}

/// Request body for reversing an entry.
#[derive(Debug, Default, Deserialize)]
pub struct ReverseEntryRequest {
    /// Business date for the reversing entry (defaults to today).
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Route Handlers
// ============================================================================

fn bad_request(message: impl Into<String>) -> axum::response::Response {
    app_error_response(&AppError::Validation(message.into()))
}

fn parse_entry_id(raw: &str) -> Result<EntryId, axum::response::Response> {
    Uuid::parse_str(raw)
        .map(EntryId::from_uuid)
        .map_err(|_| bad_request(format!("Not a valid entry id: {raw}")))
}

fn parse_amount(raw: Option<&str>) -> Result<Decimal, String> {
    match raw {
        None => Ok(Decimal::ZERO),
        Some(s) => Decimal::from_str(s).map_err(|_| format!("Not a valid amount: {s}")),
    }
}

/// GET `/entries` - List posted entries with filters.
async fn list_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let source = match query.source.as_deref().map(SourceType::from_str).transpose() {
        Ok(source) => source,
        Err(e) => return bad_request(e),
    };

    let filter = EntryFilter {
        account: query.account.map(AccountCode),
        from: query.from,
        to: query.to,
        source,
    };

    let entries = match state.ledger.entries(&filter) {
        Ok(entries) => entries,
        Err(e) => return ledger_error_response(&e),
    };

    let page_request = PageRequest {
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    let total = entries.len() as u64;
    let page: Vec<EntryResponse> = entries
        .iter()
        .skip(page_request.offset())
        .take(page_request.limit())
        .map(|entry| EntryResponse::from(entry.as_ref()))
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

/// POST `/entries` - Validate and post a new journal entry.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    let Ok(source) = SourceType::from_str(&request.source) else {
        return bad_request(format!("Unknown source type: {}", request.source));
    };

    let mut lines = Vec::with_capacity(request.lines.len());
    for line in &request.lines {
        let debit = match parse_amount(line.debit.as_deref()) {
            Ok(amount) => amount,
            Err(e) => return bad_request(e),
        };
        let credit = match parse_amount(line.credit.as_deref()) {
            Ok(amount) => amount,
            Err(e) => return bad_request(e),
        };
        lines.push(LineItem {
            account: AccountCode(line.account),
            debit,
            credit,
            memo: line.memo.clone(),
        });
    }

    let mut draft = EntryDraft::new(request.date, request.description, source, lines);
    if let Some(reference) = request.reference {
        draft = draft.with_reference(reference);
    }
    if let Some(key) = request.idempotency_key {
        draft = draft.with_idempotency_key(key);
    }

    match state.ledger.post(draft) {
        Ok(id) => {
            info!(entry_id = %id, user_id = %auth.user_id(), "Journal entry posted");
            (StatusCode::CREATED, Json(json!({ "id": id.to_string() }))).into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

/// GET `/entries/{entry_id}` - Fetch one posted entry.
async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_entry_id(&entry_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.ledger.entry(id) {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(entry.as_ref()))).into_response(),
        Err(e) => ledger_error_response(&e),
    }
}

/// POST `/entries/{entry_id}/reverse` - Post a reversing entry.
async fn reverse_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<String>,
    Json(request): Json<ReverseEntryRequest>,
) -> impl IntoResponse {
    let id = match parse_entry_id(&entry_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let date = request
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    match state.ledger.reverse(id, date) {
        Ok(reversal_id) => {
            info!(
                entry_id = %id,
                reversal_id = %reversal_id,
                user_id = %auth.user_id(),
                "Journal entry reversed"
            );
            (
                StatusCode::CREATED,
                Json(json!({ "id": reversal_id.to_string() })),
            )
                .into_response()
        }
        Err(e) => ledger_error_response(&e),
    }
}

// ============================================================================
// Tests
// ============================================================================
