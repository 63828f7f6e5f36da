//! Well-known account codes from the standard chart.
//!
//! The posting rules reference these instead of bare numbers.

use super::types::AccountCode;

/// 1000 - Cash on Hand.
pub const CASH_ON_HAND: AccountCode = AccountCode(1000);
/// 1100 - Bank Accounts.
pub const BANK_ACCOUNTS: AccountCode = AccountCode(1100);
/// 1200 - Accounts Receivable.
pub const ACCOUNTS_RECEIVABLE: AccountCode = AccountCode(1200);
/// 1300 - Raw Materials Inventory.
pub const RAW_MATERIALS: AccountCode = AccountCode(1300);
/// 1310 - Work in Process Inventory.
pub const WORK_IN_PROCESS: AccountCode = AccountCode(1310);
/// 1320 - Finished Goods Inventory.
pub const FINISHED_GOODS: AccountCode = AccountCode(1320);
/// 1400 - Equipment.
pub const EQUIPMENT: AccountCode = AccountCode(1400);
/// 1500 - Accumulated Depreciation - Equipment (contra-asset).
pub const ACCUMULATED_DEPRECIATION: AccountCode = AccountCode(1500);

/// 2000 - Accounts Payable.
pub const ACCOUNTS_PAYABLE: AccountCode = AccountCode(2000);
/// 2100 - Accrued Expenses.
pub const ACCRUED_EXPENSES: AccountCode = AccountCode(2100);
/// 2200 - Customer Deposits.
pub const CUSTOMER_DEPOSITS: AccountCode = AccountCode(2200);

/// 3000 - Owner's Capital.
pub const OWNERS_CAPITAL: AccountCode = AccountCode(3000);
/// 3100 - Retained Earnings.
pub const RETAINED_EARNINGS: AccountCode = AccountCode(3100);
/// 3200 - Current Year Profit/Loss.
pub const CURRENT_YEAR_PROFIT: AccountCode = AccountCode(3200);

/// 4000 - Sales Revenue.
pub const SALES_REVENUE: AccountCode = AccountCode(4000);
/// 4100 - Service Revenue.
pub const SERVICE_REVENUE: AccountCode = AccountCode(4100);

/// 5000 - Cost of Goods Sold.
pub const COST_OF_GOODS_SOLD: AccountCode = AccountCode(5000);
/// 5100 - Raw Materials Purchased.
pub const RAW_MATERIALS_PURCHASED: AccountCode = AccountCode(5100);
/// 5200 - Direct Labor.
pub const DIRECT_LABOR: AccountCode = AccountCode(5200);
/// 5300 - Manufacturing Overhead.
pub const MANUFACTURING_OVERHEAD: AccountCode = AccountCode(5300);
/// 5400 - Operating Expenses.
pub const OPERATING_EXPENSES: AccountCode = AccountCode(5400);
/// 5500 - Administrative Expenses.
pub const ADMINISTRATIVE_EXPENSES: AccountCode = AccountCode(5500);
/// 5600 - Selling Expenses.
pub const SELLING_EXPENSES: AccountCode = AccountCode(5600);
/// 5700 - Financing Expenses.
pub const FINANCING_EXPENSES: AccountCode = AccountCode(5700);
