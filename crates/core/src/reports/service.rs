//! Statement generation over the ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    BalanceSheetReport, IncomeStatementReport, StatementLine, StatementSection,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::accounts::{Account, AccountCategory, AccountClass, AccountCode};
use crate::ledger::{EntryFilter, Ledger, LedgerError};

/// Per-account (debit total, credit total) accumulated over a date window.
type Activity = BTreeMap<AccountCode, (Decimal, Decimal)>;

/// Service for generating financial statements.
///
/// All functions are pure reads of ledger state; nothing here posts or
/// mutates. Each one re-derives its figures from the posted entries, so
/// repeated calls always reflect the ledger at the moment of the call.
pub struct StatementService;

impl StatementService {
    /// Generates a trial balance as of `as_of` (inclusive).
    ///
    /// # Errors
    ///
    /// `LedgerError::Integrity` if the grand debit and credit totals
    /// disagree - a prior bug, since the validator admits only balanced
    /// entries. The report is withheld rather than rendered wrong.
    pub fn trial_balance(
        ledger: &Ledger,
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, LedgerError> {
        let activity = Self::account_activity(ledger, None, Some(as_of))?;

        let mut rows = Vec::with_capacity(activity.len());
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;

        for (code, (debit_total, credit_total)) in &activity {
            let account = Self::lookup(ledger, *code)?;
            rows.push(TrialBalanceRow {
                code: *code,
                name: account.name.clone(),
                class: account.class,
                debit_total: *debit_total,
                credit_total: *credit_total,
            });
            debits += *debit_total;
            credits += *credit_total;
        }

        if debits != credits {
            return Err(LedgerError::Integrity {
                detail: format!(
                    "trial balance out of balance: debits {debits}, credits {credits}"
                ),
            });
        }

        Ok(TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals { debits, credits },
        })
    }

    /// Generates an income statement over `[from, to]` (both inclusive).
    ///
    /// Revenue is reported credit-normal; cost of goods sold and operating
    /// expenses debit-normal. `net_profit` is revenue minus COGS minus
    /// operating expenses.
    pub fn income_statement(
        ledger: &Ledger,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<IncomeStatementReport, LedgerError> {
        let activity = Self::account_activity(ledger, Some(from), Some(to))?;

        let mut revenue = StatementSection::default();
        let mut cogs = StatementSection::default();
        let mut operating = StatementSection::default();

        for (code, (debit_total, credit_total)) in &activity {
            let account = Self::lookup(ledger, *code)?;
            let side = account.class.normal_balance();
            let amount = side.balance_change(*debit_total, *credit_total);
            if amount.is_zero() {
                continue;
            }

            let line = StatementLine {
                code: *code,
                name: account.name.clone(),
                amount,
            };

            match (account.class, account.category) {
                (AccountClass::Revenue, _) => revenue.push(line),
                (AccountClass::Expense, AccountCategory::CostOfGoodsSold) => cogs.push(line),
                (AccountClass::Expense, _) => operating.push(line),
                _ => {}
            }
        }

        let gross_profit = revenue.total - cogs.total;
        let net_profit = gross_profit - operating.total;

        Ok(IncomeStatementReport {
            period_start: from,
            period_end: to,
            revenue,
            cost_of_goods_sold: cogs,
            gross_profit,
            operating_expenses: operating,
            net_profit,
        })
    }

    /// Generates a balance sheet as of `as_of` (inclusive).
    ///
    /// Current-period earnings (revenue minus expenses up to the cutoff)
    /// are reported inside equity, so the accounting equation holds for
    /// any balanced ledger.
    ///
    /// # Errors
    ///
    /// `LedgerError::Integrity` if assets do not equal liabilities plus
    /// equity - a prior bug. The report is withheld rather than rendered
    /// wrong.
    pub fn balance_sheet(
        ledger: &Ledger,
        as_of: NaiveDate,
    ) -> Result<BalanceSheetReport, LedgerError> {
        let activity = Self::account_activity(ledger, None, Some(as_of))?;

        let mut assets = StatementSection::default();
        let mut liabilities = StatementSection::default();
        let mut equity = StatementSection::default();
        let mut earnings = Decimal::ZERO;

        for (code, (debit_total, credit_total)) in &activity {
            let account = Self::lookup(ledger, *code)?;
            let side = account.class.normal_balance();
            let amount = side.balance_change(*debit_total, *credit_total);

            let line = StatementLine {
                code: *code,
                name: account.name.clone(),
                amount,
            };

            match account.class {
                AccountClass::Asset => assets.push(line),
                AccountClass::Liability => liabilities.push(line),
                AccountClass::Equity => equity.push(line),
                // Revenue adds to earnings, expenses reduce them; both
                // already carry their normal-side sign.
                AccountClass::Revenue => earnings += amount,
                AccountClass::Expense => earnings -= amount,
            }
        }

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total + earnings;

        if total_assets != total_liabilities + total_equity {
            return Err(LedgerError::Integrity {
                detail: format!(
                    "accounting equation violated: assets {total_assets}, \
                     liabilities {total_liabilities}, equity {total_equity}"
                ),
            });
        }

        Ok(BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            equity,
            current_period_earnings: earnings,
            total_assets,
            total_liabilities,
            total_equity,
        })
    }

    /// Accumulates per-account debit/credit totals over a date window.
    fn account_activity(
        ledger: &Ledger,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Activity, LedgerError> {
        let filter = EntryFilter {
            account: None,
            from,
            to,
            source: None,
        };

        let mut activity = Activity::new();
        for entry in ledger.entries(&filter)? {
            for line in &entry.lines {
                let slot = activity
                    .entry(line.account)
                    .or_insert((Decimal::ZERO, Decimal::ZERO));
                slot.0 += line.debit;
                slot.1 += line.credit;
            }
        }
        Ok(activity)
    }

    /// Resolves an account that appears in posted entries.
    ///
    /// A posted line referencing an unregistered code means validation was
    /// bypassed, which is an integrity failure, not a lookup miss.
    fn lookup(ledger: &Ledger, code: AccountCode) -> Result<&Account, LedgerError> {
        ledger.chart().lookup(code).map_err(|_| LedgerError::Integrity {
            detail: format!("posted entry references unregistered account {code}"),
        })
    }
}
