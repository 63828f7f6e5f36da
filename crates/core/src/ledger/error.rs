//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;

use ponmo_shared::types::EntryId;

use crate::accounts::AccountCode;

/// What makes an individual line malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedLineKind {
    /// Both debit and credit are nonzero.
    BothSides,
    /// Neither debit nor credit is nonzero.
    Empty,
    /// A side carries a negative amount.
    NegativeAmount,
    /// An amount does not fit in the smallest currency unit.
    ExcessPrecision,
}

impl std::fmt::Display for MalformedLineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BothSides => "a line must be a debit or a credit, not both",
            Self::Empty => "a line must have either a debit or a credit amount",
            Self::NegativeAmount => "amounts must be non-negative",
            Self::ExcessPrecision => "amounts must be at currency precision",
        };
        write!(f, "{s}")
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// An entry must have at least 2 lines.
    #[error("Entry must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// Number of lines supplied.
        count: usize,
    },

    /// A line references a code missing from the chart of accounts.
    #[error("Line {index} references unregistered account {code}")]
    InvalidAccount {
        /// Zero-based index of the offending line.
        index: usize,
        /// The unregistered code.
        code: AccountCode,
    },

    /// A line violates the one-side, non-negative, currency-precision rules.
    #[error("Line {index} is malformed: {kind}")]
    MalformedLine {
        /// Zero-based index of the offending line.
        index: usize,
        /// What rule the line breaks.
        kind: MalformedLineKind,
    },

    /// The entry's debit and credit sides do not match.
    #[error("Entry is not balanced. Debits: {debits}, Credits: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// A queried account code is not registered in the chart.
    #[error("Unknown account code: {0}")]
    UnknownAccount(AccountCode),

    // ========== State Errors ==========
    /// No posted entry has the given id.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(EntryId),

    /// The entry already has a reversing entry.
    #[error("Journal entry {0} is already reversed")]
    AlreadyReversed(EntryId),

    // ========== Defensive Errors ==========
    /// The posted ledger contradicts its own invariants.
    ///
    /// Signals a prior bug. Statement generation halts on this rather than
    /// returning a plausible-looking but wrong number.
    #[error("Ledger integrity violated: {detail}")]
    Integrity {
        /// Which invariant failed, with the observed values.
        detail: String,
    },

    // ========== Collaborator Errors ==========
    /// The backing store could not complete the operation.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines { .. } => "INSUFFICIENT_LINES",
            Self::InvalidAccount { .. } => "INVALID_ACCOUNT",
            Self::MalformedLine { .. } => "MALFORMED_LINE",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::Integrity { .. } => "LEDGER_INTEGRITY",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InsufficientLines { .. }
            | Self::InvalidAccount { .. }
            | Self::MalformedLine { .. }
            | Self::Unbalanced { .. } => 400,

            // 404 Not Found
            Self::UnknownAccount(_) | Self::EntryNotFound(_) => 404,

            // 409 Conflict
            Self::AlreadyReversed(_) => 409,

            // 500 Internal Server Error - should-never-happen
            Self::Integrity { .. } => 500,

            // 503 Service Unavailable
            Self::StorageUnavailable(_) => 503,
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Only storage unavailability is retryable, and only for posts
    /// carrying an idempotency key.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
