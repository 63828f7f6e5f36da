//! The persistence collaborator boundary.
//!
//! The ledger never talks to a database directly; it appends and queries
//! through this trait. A successful `append` means the entry is durably
//! recorded; a failure means nothing was recorded.

use std::sync::Arc;

use chrono::NaiveDate;

use ponmo_shared::types::EntryId;

use super::entry::{JournalEntry, SourceType};
use super::error::LedgerError;
use crate::accounts::AccountCode;

/// Filter for querying posted entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Only entries touching this account.
    pub account: Option<AccountCode>,
    /// Only entries dated on or after this date.
    pub from: Option<NaiveDate>,
    /// Only entries dated on or before this date.
    pub to: Option<NaiveDate>,
    /// Only entries with this source tag.
    pub source: Option<SourceType>,
}

impl EntryFilter {
    /// Returns true if the entry passes the filter.
    #[must_use]
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(account) = self.account {
            if !entry.touches(account) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if entry.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if entry.date > to {
                return false;
            }
        }
        if let Some(source) = self.source {
            if entry.source != source {
                return false;
            }
        }
        true
    }
}

/// Storage boundary for posted journal entries.
///
/// Implementations must make `append` atomic (the entry is fully recorded
/// or not at all) and keep queries restartable: each call scans
/// independently, with no shared cursor. Entries are returned in posting
/// order within a date, dates ascending.
pub trait EntryStore: Send + Sync {
    /// Durably records a posted entry.
    fn append(&self, entry: JournalEntry) -> Result<EntryId, LedgerError>;

    /// Fetches one entry by id.
    fn get(&self, id: EntryId) -> Result<Option<Arc<JournalEntry>>, LedgerError>;

    /// Returns all entries matching the filter, ordered by date then
    /// posting sequence.
    fn query(&self, filter: &EntryFilter) -> Result<Vec<Arc<JournalEntry>>, LedgerError>;

    /// Looks up the entry posted under an idempotency key.
    fn find_by_idempotency_key(&self, key: &str) -> Result<Option<EntryId>, LedgerError>;

    /// Looks up the reversing entry for `id`, if one was posted.
    fn find_reversal_of(&self, id: EntryId) -> Result<Option<EntryId>, LedgerError>;

    /// Number of posted entries.
    fn count(&self) -> Result<usize, LedgerError>;
}
