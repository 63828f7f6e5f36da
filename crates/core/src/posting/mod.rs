//! Business transaction to journal entry mapping.
//!
//! Policy layer that turns the business's recurring operations (purchases,
//! production runs, sales, expenses, payments, deposits) into balanced
//! entry drafts. The ledger itself knows nothing about these rules; they
//! live outside it and can be replaced without touching the core.

pub mod rules;
pub mod types;

pub use rules::PostingRules;
pub use types::PaymentMethod;
