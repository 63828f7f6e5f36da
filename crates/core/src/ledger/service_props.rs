//! Property tests for the ledger's posting laws.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{EntryDraft, SourceType};
use super::line::LineItem;
use super::memory::InMemoryStore;
use super::service::Ledger;
use crate::accounts::{AccountClass, AccountCode, ChartOfAccounts};

const CODES: &[u16] = &[
    1000, 1100, 1200, 1300, 1310, 1320, 1400, 1500, 2000, 2100, 2200, 3000, 3100, 3200, 4000,
    4100, 5000, 5100, 5200, 5300, 5400, 5500, 5600, 5700,
];

fn make_ledger() -> Ledger {
    Ledger::new(
        Arc::new(ChartOfAccounts::standard()),
        Arc::new(InMemoryStore::new()),
    )
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

/// Strategy for an amount in cents, converted to a 2-decimal `Decimal`.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn code_strategy() -> impl Strategy<Value = AccountCode> {
    prop::sample::select(CODES).prop_map(AccountCode)
}

/// Strategy for a balanced draft: N debit lines offset by a single credit
/// line carrying their sum, so the draft balances by construction.
fn balanced_draft_strategy() -> impl Strategy<Value = EntryDraft> {
    (
        prop::collection::vec((code_strategy(), amount_strategy()), 1..5),
        code_strategy(),
        1u32..28,
    )
        .prop_map(|(debits, credit_code, d)| {
            let total: Decimal = debits.iter().map(|(_, amount)| *amount).sum();
            let mut lines: Vec<LineItem> = debits
                .into_iter()
                .map(|(code, amount)| LineItem::debit(code, amount))
                .collect();
            lines.push(LineItem::credit(credit_code, total));

            EntryDraft::new(day(d), "Generated entry", SourceType::Adjustment, lines)
        })
}

fn drafts_strategy(max_len: usize) -> impl Strategy<Value = Vec<EntryDraft>> {
    prop::collection::vec(balanced_draft_strategy(), 1..=max_len)
}

/// Sums debit and credit totals over every posted entry.
fn grand_totals(ledger: &Ledger) -> (Decimal, Decimal) {
    let entries = ledger.entries(&super::store::EntryFilter::default()).unwrap();
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    for entry in entries {
        let (d, c) = entry.totals();
        debits += d;
        credits += c;
    }
    (debits, credits)
}

/// Sums the balances of every account in one class.
fn class_total(ledger: &Ledger, class: AccountClass, as_of: NaiveDate) -> Decimal {
    ledger
        .chart()
        .in_class(class)
        .map(|account| ledger.balance_as_of(account.code, as_of).unwrap())
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any sequence of valid posts, every posted entry stays balanced
    /// and the grand debit total equals the grand credit total.
    #[test]
    fn prop_posted_ledger_stays_balanced(drafts in drafts_strategy(10)) {
        let ledger = make_ledger();
        for draft in drafts {
            ledger.post(draft).unwrap();
        }

        let (debits, credits) = grand_totals(&ledger);
        prop_assert_eq!(debits, credits);
    }

    /// Posting an entry and then its reversal restores every account
    /// balance to what it was before the entry.
    #[test]
    fn prop_reversal_round_trips_balances(
        setup in drafts_strategy(5),
        target in balanced_draft_strategy(),
    ) {
        let ledger = make_ledger();
        for draft in setup {
            ledger.post(draft).unwrap();
        }

        let as_of = day(28);
        let before: Vec<Decimal> = CODES
            .iter()
            .map(|&code| ledger.balance_as_of(AccountCode(code), as_of).unwrap())
            .collect();

        let target_date = target.date;
        let id = ledger.post(target).unwrap();
        ledger.reverse(id, target_date).unwrap();

        let after: Vec<Decimal> = CODES
            .iter()
            .map(|&code| ledger.balance_as_of(AccountCode(code), as_of).unwrap())
            .collect();

        prop_assert_eq!(before, after);
    }

    /// The accounting identity holds for any balanced ledger: assets equal
    /// liabilities plus equity plus retained current-period earnings.
    #[test]
    fn prop_accounting_identity(drafts in drafts_strategy(10)) {
        let ledger = make_ledger();
        for draft in drafts {
            ledger.post(draft).unwrap();
        }

        let as_of = day(28);
        let assets = class_total(&ledger, AccountClass::Asset, as_of);
        let liabilities = class_total(&ledger, AccountClass::Liability, as_of);
        let equity = class_total(&ledger, AccountClass::Equity, as_of);
        let revenue = class_total(&ledger, AccountClass::Revenue, as_of);
        let expenses = class_total(&ledger, AccountClass::Expense, as_of);

        prop_assert_eq!(assets, liabilities + equity + revenue - expenses);
    }

    /// Retrying a post under the same idempotency key never double-posts.
    #[test]
    fn prop_idempotent_retries_post_once(
        draft in balanced_draft_strategy(),
        retries in 1usize..5,
    ) {
        let ledger = make_ledger();
        let keyed = draft.with_idempotency_key("retry-key");

        let first = ledger.post(keyed.clone()).unwrap();
        for _ in 0..retries {
            let again = ledger.post(keyed.clone()).unwrap();
            prop_assert_eq!(first, again);
        }
        prop_assert_eq!(ledger.count().unwrap(), 1);
    }

    /// A draft with its debit/credit sums nudged apart is always rejected
    /// and never changes the ledger.
    #[test]
    fn prop_unbalanced_drafts_never_post(draft in balanced_draft_strategy()) {
        let ledger = make_ledger();

        let mut unbalanced = draft;
        let last = unbalanced.lines.last_mut().unwrap();
        last.credit += Decimal::new(1, 2);

        prop_assert!(
            matches!(
                ledger.post(unbalanced),
                Err(super::error::LedgerError::Unbalanced { .. })
            ),
            "expected Unbalanced error"
        );
        prop_assert_eq!(ledger.count().unwrap(), 0);
    }
}
