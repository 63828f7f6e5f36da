//! Journal entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ponmo_shared::types::EntryId;

use super::line::LineItem;
use crate::accounts::AccountCode;

/// The business transaction that originated a journal entry.
///
/// Informational only: statement generation never branches on it, but it
/// makes journals auditable and filterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Sale of finished goods.
    Sale,
    /// Purchase of raw materials.
    Purchase,
    /// Production run (raw materials to finished goods).
    Production,
    /// Operating expense.
    Expense,
    /// Payment made or received.
    Payment,
    /// Customer or vendor deposit.
    Deposit,
    /// Manual adjustment.
    Adjustment,
    /// Reversal of a previous entry.
    Reversal,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Production => "production",
            Self::Expense => "expense",
            Self::Payment => "payment",
            Self::Deposit => "deposit",
            Self::Adjustment => "adjustment",
            Self::Reversal => "reversal",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(Self::Sale),
            "purchase" => Ok(Self::Purchase),
            "production" => Ok(Self::Production),
            "expense" => Ok(Self::Expense),
            "payment" => Ok(Self::Payment),
            "deposit" => Ok(Self::Deposit),
            "adjustment" => Ok(Self::Adjustment),
            "reversal" => Ok(Self::Reversal),
            _ => Err(format!("Unknown source type: {s}")),
        }
    }
}

/// A proposed journal entry, not yet validated or posted.
///
/// Drafts are what the posting rules and the API hand to
/// [`Ledger::post`](super::service::Ledger::post); the ledger assigns the
/// id and timestamp on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Business date of the transaction.
    pub date: NaiveDate,
    /// Description of the transaction.
    pub description: String,
    /// Optional reference (invoice number, receipt, batch id).
    pub reference: Option<String>,
    /// Originating transaction kind.
    pub source: SourceType,
    /// Caller-supplied key making retried posts idempotent.
    pub idempotency_key: Option<String>,
    /// The debit/credit lines (at least 2 after validation).
    pub lines: Vec<LineItem>,
}

impl EntryDraft {
    /// Creates a draft with the given lines.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        source: SourceType,
        lines: Vec<LineItem>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            reference: None,
            source,
            idempotency_key: None,
            lines,
        }
    }

    /// Attaches a reference number.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Attaches an idempotency key for retry-safe posting.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// A posted, immutable journal entry.
///
/// There is no update or delete: corrections are posted as new reversing
/// entries that point back through `reverses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier, assigned at post time.
    pub id: EntryId,
    /// Business date of the transaction.
    pub date: NaiveDate,
    /// Wall-clock time the entry was posted.
    pub posted_at: DateTime<Utc>,
    /// Description of the transaction.
    pub description: String,
    /// Optional reference (invoice number, receipt, batch id).
    pub reference: Option<String>,
    /// Originating transaction kind.
    pub source: SourceType,
    /// For reversing entries, the entry being reversed.
    pub reverses: Option<EntryId>,
    /// The idempotency key the entry was posted under, if any.
    pub idempotency_key: Option<String>,
    /// The debit/credit lines.
    pub lines: Vec<LineItem>,
}

impl JournalEntry {
    /// Sums the entry's debit and credit sides.
    #[must_use]
    pub fn totals(&self) -> (Decimal, Decimal) {
        let debits = self.lines.iter().map(|line| line.debit).sum();
        let credits = self.lines.iter().map(|line| line.credit).sum();
        (debits, credits)
    }

    /// Iterates over the lines touching one account.
    pub fn lines_for(&self, account: AccountCode) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().filter(move |line| line.account == account)
    }

    /// Returns true if any line touches the account.
    #[must_use]
    pub fn touches(&self, account: AccountCode) -> bool {
        self.lines.iter().any(|line| line.account == account)
    }
}
