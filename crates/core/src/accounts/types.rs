//! Account domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric account code.
///
/// Codes live in five reserved thousand-ranges: 1000s are Assets, 2000s
/// Liabilities, 3000s Equity, 4000s Revenue, 5000s Expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCode(pub u16);

impl AccountCode {
    /// Returns the raw numeric code.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountCode {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<u16> for AccountCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Account classification.
///
/// The class determines the account's normal balance side and which
/// financial statement it appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
    /// Resources owned by the business (1000-1999).
    Asset,
    /// Obligations owed to others (2000-2999).
    Liability,
    /// Owner's stake in the business (3000-3999).
    Equity,
    /// Income earned from operations (4000-4999).
    Revenue,
    /// Costs incurred in operations (5000-5999).
    Expense,
}

impl AccountClass {
    /// Derives the class from a code's thousand-range.
    ///
    /// Returns `None` for codes outside the five reserved ranges.
    #[must_use]
    pub const fn from_code(code: AccountCode) -> Option<Self> {
        match code.0 {
            1000..=1999 => Some(Self::Asset),
            2000..=2999 => Some(Self::Liability),
            3000..=3999 => Some(Self::Equity),
            4000..=4999 => Some(Self::Revenue),
            5000..=5999 => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the side on which this class normally carries its balance.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

impl std::fmt::Display for AccountClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        };
        write!(f, "{s}")
    }
}

/// The normal balance side of an account class.
///
/// - Asset/Expense accounts grow with debits (debit-normal)
/// - Liability/Equity/Revenue accounts grow with credits (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal: balance reported as debits minus credits.
    Debit,
    /// Credit-normal: balance reported as credits minus debits.
    Credit,
}

impl NormalBalance {
    /// Calculates the signed balance change a (debit, credit) pair
    /// contributes to an account with this normal side.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Account grouping used by the statement generator.
///
/// Categories refine the class: they split current from fixed assets,
/// cost of goods sold from operating expenses, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Cash, receivables, inventory.
    CurrentAsset,
    /// Equipment and accumulated depreciation.
    FixedAsset,
    /// Payables, accruals, customer deposits.
    CurrentLiability,
    /// Loans and other long-term obligations.
    LongTermLiability,
    /// Capital, retained earnings.
    OwnerEquity,
    /// Sales and service revenue.
    OperatingRevenue,
    /// Direct production costs.
    CostOfGoodsSold,
    /// Administrative, selling, and other indirect costs.
    OperatingExpense,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account code.
    pub code: AccountCode,
    /// Display name.
    pub name: String,
    /// Class, derived from the code range at registration time.
    pub class: AccountClass,
    /// Statement grouping.
    pub category: AccountCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(1000, AccountClass::Asset)]
    #[case(1999, AccountClass::Asset)]
    #[case(2200, AccountClass::Liability)]
    #[case(3100, AccountClass::Equity)]
    #[case(4000, AccountClass::Revenue)]
    #[case(5700, AccountClass::Expense)]
    fn test_class_from_code_ranges(#[case] code: u16, #[case] expected: AccountClass) {
        assert_eq!(AccountClass::from_code(AccountCode(code)), Some(expected));
    }

    #[rstest]
    #[case(0)]
    #[case(999)]
    #[case(6000)]
    #[case(u16::MAX)]
    fn test_class_from_code_out_of_range(#[case] code: u16) {
        assert_eq!(AccountClass::from_code(AccountCode(code)), None);
    }

    #[test]
    fn test_normal_balance_by_class() {
        assert_eq!(AccountClass::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountClass::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountClass::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountClass::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(
            AccountClass::Revenue.normal_balance(),
            NormalBalance::Credit
        );
    }

    #[test]
    fn test_debit_normal_balance_change() {
        let side = NormalBalance::Debit;

        // Debit increases balance
        assert_eq!(side.balance_change(dec!(100), dec!(0)), dec!(100));

        // Credit decreases balance
        assert_eq!(side.balance_change(dec!(0), dec!(50)), dec!(-50));
    }

    #[test]
    fn test_credit_normal_balance_change() {
        let side = NormalBalance::Credit;

        // Credit increases balance
        assert_eq!(side.balance_change(dec!(0), dec!(100)), dec!(100));

        // Debit decreases balance
        assert_eq!(side.balance_change(dec!(50), dec!(0)), dec!(-50));
    }

    #[test]
    fn test_account_code_display_and_parse() {
        let code: AccountCode = "1300".parse().unwrap();
        assert_eq!(code, AccountCode(1300));
        assert_eq!(code.to_string(), "1300");
    }
}
