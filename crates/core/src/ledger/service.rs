//! The append-only ledger.
//!
//! The ledger owns the ordered sequence of posted journal entries. It
//! validates every draft before appending, serializes appends so ids and
//! ordering are assigned atomically, and derives account balances using
//! each account class's normal side.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use ponmo_shared::types::EntryId;

use super::entry::{EntryDraft, JournalEntry, SourceType};
use super::error::LedgerError;
use super::line::LineItem;
use super::store::{EntryFilter, EntryStore};
use super::validation::validate_lines;
use crate::accounts::{AccountCode, ChartOfAccounts};

/// A line item joined with its parent entry's context.
///
/// What [`Ledger::entries_for`] yields: everything needed to render one
/// row of an account's ledger without fetching the parent entry again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPosting {
    /// The parent entry's id.
    pub entry_id: EntryId,
    /// The parent entry's business date.
    pub date: NaiveDate,
    /// The parent entry's description.
    pub description: String,
    /// The parent entry's reference, if any.
    pub reference: Option<String>,
    /// The parent entry's source tag.
    pub source: SourceType,
    /// Debit amount of this line.
    pub debit: Decimal,
    /// Credit amount of this line.
    pub credit: Decimal,
    /// Line memo, if any.
    pub memo: Option<String>,
}

/// The append-only double-entry ledger.
///
/// `post` and `reverse` are serialized per instance: at most one append is
/// in flight at a time, so two concurrent posts can never interleave id
/// assignment and ordering. Reads go straight to the store, which
/// guarantees consistent snapshots.
pub struct Ledger {
    chart: Arc<ChartOfAccounts>,
    store: Arc<dyn EntryStore>,
    append_lock: Mutex<()>,
}

impl Ledger {
    /// Creates a ledger over the given chart and store.
    #[must_use]
    pub fn new(chart: Arc<ChartOfAccounts>, store: Arc<dyn EntryStore>) -> Self {
        Self {
            chart,
            store,
            append_lock: Mutex::new(()),
        }
    }

    /// The chart of accounts this ledger validates against.
    #[must_use]
    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Validates and posts a draft, returning the new entry's id.
    ///
    /// All-or-nothing: on any error nothing is appended. If the draft
    /// carries an idempotency key that was already posted, the original
    /// entry's id is returned and nothing new is appended, which makes
    /// retries after a storage failure safe.
    ///
    /// # Errors
    ///
    /// Propagates validation errors unchanged, and
    /// `LedgerError::StorageUnavailable` if the store cannot complete the
    /// append.
    pub fn post(&self, draft: EntryDraft) -> Result<EntryId, LedgerError> {
        validate_lines(&self.chart, &draft.lines)?;

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| LedgerError::StorageUnavailable("ledger append lock poisoned".into()))?;

        if let Some(key) = &draft.idempotency_key {
            if let Some(existing) = self.store.find_by_idempotency_key(key)? {
                return Ok(existing);
            }
        }

        let entry = JournalEntry {
            id: EntryId::new(),
            date: draft.date,
            posted_at: Utc::now(),
            description: draft.description,
            reference: draft.reference,
            source: draft.source,
            reverses: None,
            idempotency_key: draft.idempotency_key,
            lines: draft.lines,
        };

        self.store.append(entry)
    }

    /// Fetches a posted entry by id.
    ///
    /// # Errors
    ///
    /// `LedgerError::EntryNotFound` if no entry has the id.
    pub fn entry(&self, id: EntryId) -> Result<Arc<JournalEntry>, LedgerError> {
        self.store
            .get(id)?
            .ok_or(LedgerError::EntryNotFound(id))
    }

    /// Returns all posted entries matching the filter, ordered by date
    /// then posting sequence.
    pub fn entries(&self, filter: &EntryFilter) -> Result<Vec<Arc<JournalEntry>>, LedgerError> {
        self.store.query(filter)
    }

    /// Returns the account's line items joined with their parent entries,
    /// ordered by entry date then posting sequence.
    ///
    /// Each call re-scans independently; there is no shared cursor.
    pub fn entries_for(
        &self,
        account: AccountCode,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AccountPosting>, LedgerError> {
        if !self.chart.contains(account) {
            return Err(LedgerError::UnknownAccount(account));
        }

        let filter = EntryFilter {
            account: Some(account),
            from,
            to,
            source: None,
        };

        let mut postings = Vec::new();
        for entry in self.store.query(&filter)? {
            for line in entry.lines_for(account) {
                postings.push(AccountPosting {
                    entry_id: entry.id,
                    date: entry.date,
                    description: entry.description.clone(),
                    reference: entry.reference.clone(),
                    source: entry.source,
                    debit: line.debit,
                    credit: line.credit,
                    memo: line.memo.clone(),
                });
            }
        }
        Ok(postings)
    }

    /// Returns the account's signed balance over all entries dated up to
    /// and including `as_of`.
    ///
    /// Sign convention: Asset/Expense accounts report debits minus
    /// credits; Liability/Equity/Revenue accounts report credits minus
    /// debits.
    pub fn balance_as_of(
        &self,
        account: AccountCode,
        as_of: NaiveDate,
    ) -> Result<Decimal, LedgerError> {
        let class = self
            .chart
            .classify(account)
            .map_err(|_| LedgerError::UnknownAccount(account))?;
        let side = class.normal_balance();

        let filter = EntryFilter {
            account: Some(account),
            from: None,
            to: Some(as_of),
            source: None,
        };

        let mut balance = Decimal::ZERO;
        for entry in self.store.query(&filter)? {
            for line in entry.lines_for(account) {
                balance += side.balance_change(line.debit, line.credit);
            }
        }
        Ok(balance)
    }

    /// Posts a reversing entry for `id`, dated `date`, and returns the new
    /// entry's id.
    ///
    /// The reversal swaps each original line's debit and credit amounts;
    /// the original entry is left untouched. An entry can be reversed at
    /// most once.
    ///
    /// # Errors
    ///
    /// `LedgerError::EntryNotFound` if `id` is absent (nothing is posted),
    /// `LedgerError::AlreadyReversed` if a reversing entry already exists.
    pub fn reverse(&self, id: EntryId, date: NaiveDate) -> Result<EntryId, LedgerError> {
        let original = self.entry(id)?;

        let lines = original.lines.iter().map(LineItem::swapped).collect();

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| LedgerError::StorageUnavailable("ledger append lock poisoned".into()))?;

        if self.store.find_reversal_of(id)?.is_some() {
            return Err(LedgerError::AlreadyReversed(id));
        }

        let entry = JournalEntry {
            id: EntryId::new(),
            date,
            posted_at: Utc::now(),
            description: format!("Reversal of {}", original.description),
            reference: original.reference.as_ref().map(|r| format!("REV-{r}")),
            source: SourceType::Reversal,
            reverses: Some(id),
            idempotency_key: None,
            lines,
        };

        self.store.append(entry)
    }

    /// Number of posted entries.
    pub fn count(&self) -> Result<usize, LedgerError> {
        self.store.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use super::super::memory::InMemoryStore;

    fn ledger() -> Ledger {
        Ledger::new(
            Arc::new(ChartOfAccounts::standard()),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn purchase_draft(amount: Decimal) -> EntryDraft {
        EntryDraft::new(
            day(3),
            "Purchase of raw materials",
            SourceType::Purchase,
            vec![
                LineItem::debit(AccountCode(1300), amount),
                LineItem::credit(AccountCode(2000), amount),
            ],
        )
    }

    #[test]
    fn test_post_assigns_id_and_appends() {
        let ledger = ledger();
        let id = ledger.post(purchase_draft(dec!(1000))).unwrap();

        let entry = ledger.entry(id).unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.date, day(3));
        assert_eq!(ledger.count().unwrap(), 1);
    }

    #[test]
    fn test_post_rejects_unbalanced_without_appending() {
        let ledger = ledger();
        let draft = EntryDraft::new(
            day(3),
            "Unbalanced purchase",
            SourceType::Purchase,
            vec![
                LineItem::debit(AccountCode(1300), dec!(1000)),
                LineItem::credit(AccountCode(2000), dec!(900)),
            ],
        );

        assert!(matches!(
            ledger.post(draft),
            Err(LedgerError::Unbalanced { .. })
        ));
        assert_eq!(ledger.count().unwrap(), 0);
    }

    #[test]
    fn test_purchase_balances_both_sides() {
        let ledger = ledger();
        ledger.post(purchase_draft(dec!(1000))).unwrap();

        // 1300 is debit-normal, 2000 is credit-normal; both report 1000.
        assert_eq!(
            ledger.balance_as_of(AccountCode(1300), day(28)).unwrap(),
            dec!(1000)
        );
        assert_eq!(
            ledger.balance_as_of(AccountCode(2000), day(28)).unwrap(),
            dec!(1000)
        );
    }

    #[test]
    fn test_balance_respects_as_of_date() {
        let ledger = ledger();
        ledger.post(purchase_draft(dec!(1000))).unwrap();

        assert_eq!(
            ledger.balance_as_of(AccountCode(1300), day(2)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            ledger.balance_as_of(AccountCode(1300), day(3)).unwrap(),
            dec!(1000)
        );
    }

    #[test]
    fn test_balance_unknown_account() {
        let ledger = ledger();
        assert_eq!(
            ledger.balance_as_of(AccountCode(9999), day(1)),
            Err(LedgerError::UnknownAccount(AccountCode(9999)))
        );
    }

    #[test]
    fn test_entries_for_joins_parent_context() {
        let ledger = ledger();
        let id = ledger
            .post(purchase_draft(dec!(250)).with_reference("PO-1"))
            .unwrap();

        let postings = ledger.entries_for(AccountCode(1300), None, None).unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].entry_id, id);
        assert_eq!(postings[0].debit, dec!(250));
        assert_eq!(postings[0].reference.as_deref(), Some("PO-1"));
        assert_eq!(postings[0].source, SourceType::Purchase);
    }

    #[test]
    fn test_entries_for_is_restartable() {
        let ledger = ledger();
        ledger.post(purchase_draft(dec!(100))).unwrap();

        let first = ledger.entries_for(AccountCode(1300), None, None).unwrap();
        let second = ledger.entries_for(AccountCode(1300), None, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reverse_swaps_sides_and_preserves_original() {
        let ledger = ledger();
        let original_id = ledger.post(purchase_draft(dec!(1000))).unwrap();
        let reversal_id = ledger.reverse(original_id, day(10)).unwrap();

        let original = ledger.entry(original_id).unwrap();
        let reversal = ledger.entry(reversal_id).unwrap();

        assert_eq!(original.lines[0].debit, dec!(1000));
        assert_eq!(reversal.lines[0].credit, dec!(1000));
        assert_eq!(reversal.lines[0].debit, Decimal::ZERO);
        assert_eq!(reversal.reverses, Some(original_id));
        assert_eq!(reversal.source, SourceType::Reversal);

        // Round trip: balances are back where they started.
        assert_eq!(
            ledger.balance_as_of(AccountCode(1300), day(28)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            ledger.balance_as_of(AccountCode(2000), day(28)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_reverse_missing_entry_posts_nothing() {
        let ledger = ledger();
        let missing = EntryId::new();

        assert_eq!(
            ledger.reverse(missing, day(1)),
            Err(LedgerError::EntryNotFound(missing))
        );
        assert_eq!(ledger.count().unwrap(), 0);
    }

    #[test]
    fn test_reverse_twice_is_rejected() {
        let ledger = ledger();
        let id = ledger.post(purchase_draft(dec!(500))).unwrap();

        ledger.reverse(id, day(5)).unwrap();
        assert_eq!(
            ledger.reverse(id, day(6)),
            Err(LedgerError::AlreadyReversed(id))
        );
        assert_eq!(ledger.count().unwrap(), 2);
    }

    #[test]
    fn test_idempotent_post_returns_original_id() {
        let ledger = ledger();
        let draft = purchase_draft(dec!(750)).with_idempotency_key("po-750");

        let first = ledger.post(draft.clone()).unwrap();
        let second = ledger.post(draft).unwrap();

        assert_eq!(first, second);
        assert_eq!(ledger.count().unwrap(), 1);
    }

    #[test]
    fn test_reversal_reference_gains_rev_prefix() {
        let ledger = ledger();
        let id = ledger
            .post(purchase_draft(dec!(10)).with_reference("PO-9"))
            .unwrap();
        let reversal_id = ledger.reverse(id, day(4)).unwrap();

        let reversal = ledger.entry(reversal_id).unwrap();
        assert_eq!(reversal.reference.as_deref(), Some("REV-PO-9"));
        assert!(reversal.description.starts_with("Reversal of "));
    }
}
