//! Business rule validation for proposed journal entries.
//!
//! Validation is a pure function of the chart and the line set: no side
//! effects, and identical input always yields the identical result. The
//! ledger runs it before every append so nothing unbalanced or malformed
//! can ever reach the journal.

use rust_decimal::Decimal;

use ponmo_shared::types::amount::is_currency_precision;

use super::error::{LedgerError, MalformedLineKind};
use super::line::LineItem;
use crate::accounts::ChartOfAccounts;

/// Debit and credit sums of a validated line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debits: Decimal,
    /// Total credit amount.
    pub credits: Decimal,
}

impl EntryTotals {
    /// Returns true if debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debits == self.credits
    }
}

/// Validates a proposed set of lines against the chart.
///
/// Checks, in order:
/// 1. At least 2 lines
/// 2. Every line references a registered account
/// 3. Each line is exactly one of debit/credit, non-negative, at currency
///    precision
/// 4. Total debits equal total credits, exactly
///
/// # Errors
///
/// Returns the first violated rule as a [`LedgerError`]; the caller's
/// lines are never modified or auto-corrected.
pub fn validate_lines(
    chart: &ChartOfAccounts,
    lines: &[LineItem],
) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines { count: lines.len() });
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        if !chart.contains(line.account) {
            return Err(LedgerError::InvalidAccount {
                index,
                code: line.account,
            });
        }

        if let Some(kind) = malformed_kind(line) {
            return Err(LedgerError::MalformedLine { index, kind });
        }

        debits += line.debit;
        credits += line.credit;
    }

    let totals = EntryTotals { debits, credits };
    if !totals.is_balanced() {
        return Err(LedgerError::Unbalanced { debits, credits });
    }

    Ok(totals)
}

fn malformed_kind(line: &LineItem) -> Option<MalformedLineKind> {
    if line.debit.is_sign_negative() || line.credit.is_sign_negative() {
        return Some(MalformedLineKind::NegativeAmount);
    }
    if !line.debit.is_zero() && !line.credit.is_zero() {
        return Some(MalformedLineKind::BothSides);
    }
    if line.debit.is_zero() && line.credit.is_zero() {
        return Some(MalformedLineKind::Empty);
    }
    if !is_currency_precision(line.debit) || !is_currency_precision(line.credit) {
        return Some(MalformedLineKind::ExcessPrecision);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::accounts::AccountCode;

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::standard()
    }

    #[test]
    fn test_balanced_lines() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(1000)),
            LineItem::credit(AccountCode(2000), dec!(1000)),
        ];

        let totals = validate_lines(&chart(), &lines).unwrap();
        assert!(totals.is_balanced());
        assert_eq!(totals.debits, dec!(1000));
        assert_eq!(totals.credits, dec!(1000));
    }

    #[test]
    fn test_unbalanced_lines() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(1000)),
            LineItem::credit(AccountCode(2000), dec!(900)),
        ];

        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::Unbalanced {
                debits: dec!(1000),
                credits: dec!(900),
            })
        );
    }

    #[test]
    fn test_insufficient_lines() {
        let lines = vec![LineItem::debit(AccountCode(1300), dec!(1000))];
        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::InsufficientLines { count: 1 })
        );

        assert_eq!(
            validate_lines(&chart(), &[]),
            Err(LedgerError::InsufficientLines { count: 0 })
        );
    }

    #[test]
    fn test_unregistered_account() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(1000)),
            LineItem::credit(AccountCode(9999), dec!(1000)),
        ];

        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::InvalidAccount {
                index: 1,
                code: AccountCode(9999),
            })
        );
    }

    #[test]
    fn test_line_with_both_sides() {
        let both = LineItem {
            account: AccountCode(1300),
            debit: dec!(100),
            credit: dec!(100),
            memo: None,
        };
        let lines = vec![both, LineItem::credit(AccountCode(2000), dec!(0))];

        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::MalformedLine {
                index: 0,
                kind: MalformedLineKind::BothSides,
            })
        );
    }

    #[test]
    fn test_line_with_neither_side() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(100)),
            LineItem::credit(AccountCode(2000), dec!(0)),
        ];

        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::MalformedLine {
                index: 1,
                kind: MalformedLineKind::Empty,
            })
        );
    }

    #[test]
    fn test_negative_amount() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(-100)),
            LineItem::credit(AccountCode(2000), dec!(-100)),
        ];

        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::MalformedLine {
                index: 0,
                kind: MalformedLineKind::NegativeAmount,
            })
        );
    }

    #[test]
    fn test_sub_cent_precision_rejected() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(10.005)),
            LineItem::credit(AccountCode(2000), dec!(10.005)),
        ];

        assert_eq!(
            validate_lines(&chart(), &lines),
            Err(LedgerError::MalformedLine {
                index: 0,
                kind: MalformedLineKind::ExcessPrecision,
            })
        );
    }

    #[test]
    fn test_multi_line_entry_balances_across_lines() {
        // A sale with partial payment: two debit lines against one credit.
        let lines = vec![
            LineItem::debit(AccountCode(1000), dec!(500)),
            LineItem::debit(AccountCode(1200), dec!(1000)),
            LineItem::credit(AccountCode(4000), dec!(1500)),
        ];

        assert!(validate_lines(&chart(), &lines).is_ok());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let lines = vec![
            LineItem::debit(AccountCode(1300), dec!(123.45)),
            LineItem::credit(AccountCode(2000), dec!(123.45)),
        ];

        let first = validate_lines(&chart(), &lines);
        let second = validate_lines(&chart(), &lines);
        assert_eq!(first, second);
    }
}
