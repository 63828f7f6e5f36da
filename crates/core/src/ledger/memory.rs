//! In-memory entry store for tests, demos, and single-process deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ponmo_shared::types::EntryId;

use super::entry::JournalEntry;
use super::error::LedgerError;
use super::store::{EntryFilter, EntryStore};

/// In-memory [`EntryStore`] behind an `RwLock`.
///
/// Writers take the lock exclusively, so readers observe either the state
/// strictly before or strictly after an append, never a partially-applied
/// entry.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    // Append order; queries sort by date but keep this order within a date.
    entries: Vec<Arc<JournalEntry>>,
    by_id: HashMap<EntryId, usize>,
    by_idempotency_key: HashMap<String, EntryId>,
    reversal_of: HashMap<EntryId, EntryId>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> LedgerError {
    LedgerError::StorageUnavailable("entry store lock poisoned".to_string())
}

impl EntryStore for InMemoryStore {
    fn append(&self, entry: JournalEntry) -> Result<EntryId, LedgerError> {
        let mut state = self.inner.write().map_err(poisoned)?;

        let id = entry.id;
        let index = state.entries.len();

        if let Some(key) = &entry.idempotency_key {
            state.by_idempotency_key.insert(key.clone(), id);
        }
        if let Some(original) = entry.reverses {
            state.reversal_of.insert(original, id);
        }
        state.by_id.insert(id, index);
        state.entries.push(Arc::new(entry));

        Ok(id)
    }

    fn get(&self, id: EntryId) -> Result<Option<Arc<JournalEntry>>, LedgerError> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state
            .by_id
            .get(&id)
            .map(|&index| Arc::clone(&state.entries[index])))
    }

    fn query(&self, filter: &EntryFilter) -> Result<Vec<Arc<JournalEntry>>, LedgerError> {
        let state = self.inner.read().map_err(poisoned)?;

        let mut matched: Vec<Arc<JournalEntry>> = state
            .entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();

        // Stable sort keeps posting order within a date.
        matched.sort_by_key(|entry| entry.date);

        Ok(matched)
    }

    fn find_by_idempotency_key(&self, key: &str) -> Result<Option<EntryId>, LedgerError> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.by_idempotency_key.get(key).copied())
    }

    fn find_reversal_of(&self, id: EntryId) -> Result<Option<EntryId>, LedgerError> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.reversal_of.get(&id).copied())
    }

    fn count(&self) -> Result<usize, LedgerError> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    use super::super::entry::SourceType;
    use super::super::line::LineItem;
    use crate::accounts::AccountCode;

    fn entry_on(day: u32, description: &str) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            posted_at: Utc::now(),
            description: description.to_string(),
            reference: None,
            source: SourceType::Adjustment,
            reverses: None,
            idempotency_key: None,
            lines: vec![
                LineItem::debit(AccountCode(1000), dec!(10)),
                LineItem::credit(AccountCode(3000), dec!(10)),
            ],
        }
    }

    #[test]
    fn test_append_then_get() {
        let store = InMemoryStore::new();
        let entry = entry_on(5, "first");
        let id = store.append(entry).unwrap();

        let fetched = store.get(id).unwrap().unwrap();
        assert_eq!(fetched.description, "first");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_query_orders_by_date_then_posting_order() {
        let store = InMemoryStore::new();
        store.append(entry_on(20, "late")).unwrap();
        store.append(entry_on(5, "early")).unwrap();
        store.append(entry_on(20, "late-second")).unwrap();

        let all = store.query(&EntryFilter::default()).unwrap();
        let descriptions: Vec<&str> = all.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["early", "late", "late-second"]);
    }

    #[test]
    fn test_query_filters_by_date_range() {
        let store = InMemoryStore::new();
        store.append(entry_on(1, "jan-1")).unwrap();
        store.append(entry_on(15, "jan-15")).unwrap();
        store.append(entry_on(31, "jan-31")).unwrap();

        let filter = EntryFilter {
            from: NaiveDate::from_ymd_opt(2026, 1, 10),
            to: NaiveDate::from_ymd_opt(2026, 1, 20),
            ..EntryFilter::default()
        };
        let matched = store.query(&filter).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].description, "jan-15");
    }

    #[test]
    fn test_query_filters_by_account() {
        let store = InMemoryStore::new();
        store.append(entry_on(1, "cash")).unwrap();

        let hit = EntryFilter {
            account: Some(AccountCode(1000)),
            ..EntryFilter::default()
        };
        let miss = EntryFilter {
            account: Some(AccountCode(4000)),
            ..EntryFilter::default()
        };
        assert_eq!(store.query(&hit).unwrap().len(), 1);
        assert!(store.query(&miss).unwrap().is_empty());
    }

    #[test]
    fn test_queries_are_restartable() {
        let store = InMemoryStore::new();
        store.append(entry_on(1, "one")).unwrap();

        let filter = EntryFilter::default();
        let first = store.query(&filter).unwrap();
        let second = store.query(&filter).unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_idempotency_key_lookup() {
        let store = InMemoryStore::new();
        let mut entry = entry_on(1, "keyed");
        entry.idempotency_key = Some("retry-123".to_string());
        let id = store.append(entry).unwrap();

        assert_eq!(store.find_by_idempotency_key("retry-123").unwrap(), Some(id));
        assert_eq!(store.find_by_idempotency_key("other").unwrap(), None);
    }

    #[test]
    fn test_reversal_lookup() {
        let store = InMemoryStore::new();
        let original = entry_on(1, "original");
        let original_id = store.append(original).unwrap();

        let mut reversal = entry_on(2, "reversal");
        reversal.reverses = Some(original_id);
        let reversal_id = store.append(reversal).unwrap();

        assert_eq!(
            store.find_reversal_of(original_id).unwrap(),
            Some(reversal_id)
        );
        assert_eq!(store.find_reversal_of(reversal_id).unwrap(), None);
    }
}
