//! Chart of accounts registry.
//!
//! The chart maps numeric account codes to named accounts. An account's
//! class (Asset, Liability, Equity, Revenue, Expense) is fully determined
//! by the thousand-range its code falls in; the registry is immutable once
//! built and is passed explicitly to everything that needs it.

pub mod codes;
pub mod error;
pub mod registry;
pub mod types;

pub use error::ChartError;
pub use registry::ChartOfAccounts;
pub use types::{Account, AccountCategory, AccountClass, AccountCode, NormalBalance};
