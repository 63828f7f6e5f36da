//! Posting rule input types.

use serde::{Deserialize, Serialize};

use crate::accounts::{AccountCode, codes};

/// How a transaction was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Check (settles through the bank account).
    Check,
    /// On credit, settled later through accounts payable.
    OnAccount,
}

impl PaymentMethod {
    /// The account the money moves through for this method.
    #[must_use]
    pub const fn settlement_account(self) -> AccountCode {
        match self {
            Self::Cash => codes::CASH_ON_HAND,
            Self::BankTransfer | Self::Check => codes::BANK_ACCOUNTS,
            Self::OnAccount => codes::ACCOUNTS_PAYABLE,
        }
    }

    /// Returns true if the method settles immediately (cash or bank).
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        !matches!(self, Self::OnAccount)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "bank_transfer" => Ok(Self::BankTransfer),
            "check" => Ok(Self::Check),
            "on_account" => Ok(Self::OnAccount),
            _ => Err(format!("Unknown payment method: {s}")),
        }
    }
}
