//! Journal entry line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountCode;

/// A single debit or credit line within a journal entry.
///
/// Exactly one of `debit`/`credit` is nonzero on a well-formed line; the
/// validator enforces this before anything reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The account this line posts to.
    pub account: AccountCode,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional memo for this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl LineItem {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: AccountCode, amount: Decimal) -> Self {
        Self {
            account,
            debit: amount,
            credit: Decimal::ZERO,
            memo: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: AccountCode, amount: Decimal) -> Self {
        Self {
            account,
            debit: Decimal::ZERO,
            credit: amount,
            memo: None,
        }
    }

    /// Attaches a memo to the line.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Returns true if this is a debit line.
    #[must_use]
    pub fn is_debit(&self) -> bool {
        !self.debit.is_zero()
    }

    /// Returns a copy with the debit and credit sides swapped.
    ///
    /// Building block for reversing entries.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            account: self.account,
            debit: self.credit,
            credit: self.debit,
            memo: self.memo.clone(),
        }
    }
}
