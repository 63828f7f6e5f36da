//! The immutable chart of accounts registry.

use std::collections::BTreeMap;

use super::error::ChartError;
use super::types::{Account, AccountCategory, AccountClass, AccountCode};

/// Immutable registry mapping account codes to accounts.
///
/// Built once at startup and passed by reference (or `Arc`) to the
/// validator, ledger, and statement generator. There is no mutation API:
/// adding an account means building a new chart.
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<AccountCode, Account>,
}

impl ChartOfAccounts {
    /// Builds a chart from `(code, name, category)` rows.
    ///
    /// The class of each account is derived from its code range, never
    /// supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::CodeOutOfRange` for codes outside 1000-5999
    /// and `ChartError::DuplicateCode` for repeated codes.
    pub fn new<N: Into<String>>(
        rows: impl IntoIterator<Item = (u16, N, AccountCategory)>,
    ) -> Result<Self, ChartError> {
        let mut accounts = BTreeMap::new();

        for (raw_code, name, category) in rows {
            let code = AccountCode(raw_code);
            let class =
                AccountClass::from_code(code).ok_or(ChartError::CodeOutOfRange(code))?;

            let account = Account {
                code,
                name: name.into(),
                class,
                category,
            };

            if accounts.insert(code, account).is_some() {
                return Err(ChartError::DuplicateCode(code));
            }
        }

        Ok(Self { accounts })
    }

    /// The standard chart for the ponmo business.
    ///
    /// Covers cash, bank, receivables, the three inventory stages,
    /// equipment, payables, customer deposits, owner equity, sales and
    /// service revenue, and the cost/expense accounts.
    #[must_use]
    pub fn standard() -> Self {
        use AccountCategory::{
            CostOfGoodsSold, CurrentAsset, CurrentLiability, FixedAsset, OperatingExpense,
            OperatingRevenue, OwnerEquity,
        };

        // Codes are all in range and unique; the constructor cannot fail.
        Self::new([
            (1000, "Cash on Hand", CurrentAsset),
            (1100, "Bank Accounts", CurrentAsset),
            (1200, "Accounts Receivable", CurrentAsset),
            (1300, "Raw Materials Inventory", CurrentAsset),
            (1310, "Work in Process Inventory", CurrentAsset),
            (1320, "Finished Goods Inventory", CurrentAsset),
            (1400, "Equipment", FixedAsset),
            (1500, "Accumulated Depreciation - Equipment", FixedAsset),
            (2000, "Accounts Payable", CurrentLiability),
            (2100, "Accrued Expenses", CurrentLiability),
            (2200, "Customer Deposits", CurrentLiability),
            (3000, "Owner's Capital", OwnerEquity),
            (3100, "Retained Earnings", OwnerEquity),
            (3200, "Current Year Profit/Loss", OwnerEquity),
            (4000, "Sales Revenue", OperatingRevenue),
            (4100, "Service Revenue", OperatingRevenue),
            (5000, "Cost of Goods Sold", CostOfGoodsSold),
            (5100, "Raw Materials Purchased", CostOfGoodsSold),
            (5200, "Direct Labor", CostOfGoodsSold),
            (5300, "Manufacturing Overhead", CostOfGoodsSold),
            (5400, "Operating Expenses", OperatingExpense),
            (5500, "Administrative Expenses", OperatingExpense),
            (5600, "Selling Expenses", OperatingExpense),
            (5700, "Financing Expenses", OperatingExpense),
        ])
        .expect("standard chart is well-formed")
    }

    /// Looks up an account by code.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::UnknownAccount` for unregistered codes.
    pub fn lookup(&self, code: AccountCode) -> Result<&Account, ChartError> {
        self.accounts
            .get(&code)
            .ok_or(ChartError::UnknownAccount(code))
    }

    /// Returns the class of a registered account.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::UnknownAccount` for unregistered codes.
    pub fn classify(&self, code: AccountCode) -> Result<AccountClass, ChartError> {
        self.lookup(code).map(|account| account.class)
    }

    /// Returns true if the code is registered.
    #[must_use]
    pub fn contains(&self, code: AccountCode) -> bool {
        self.accounts.contains_key(&code)
    }

    /// Iterates over all accounts in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Iterates over the accounts of one class, in code order.
    pub fn in_class(&self, class: AccountClass) -> impl Iterator<Item = &Account> {
        self.iter().filter(move |account| account.class == class)
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
