//! Financial statement generation.
//!
//! Pure functions of ledger state as of a cutoff date or range:
//! - Trial balance
//! - Income statement (profit and loss)
//! - Balance sheet
//!
//! Every statement re-checks the books' invariants and refuses to render a
//! plausible-looking but wrong number if they do not hold.

pub mod service;
pub mod types;


pub use service::StatementService;
pub use types::{
    BalanceSheetReport, IncomeStatementReport, StatementLine, StatementSection,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
