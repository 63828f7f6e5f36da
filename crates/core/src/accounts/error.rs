//! Chart of accounts error types.

use thiserror::Error;

use super::types::AccountCode;

/// Errors raised by the chart of accounts registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The code is not registered in the chart.
    #[error("Unknown account code: {0}")]
    UnknownAccount(AccountCode),

    /// The code falls outside the five reserved thousand-ranges.
    #[error("Account code {0} is outside the reserved ranges (1000-5999)")]
    CodeOutOfRange(AccountCode),

    /// The code was registered twice.
    #[error("Duplicate account code: {0}")]
    DuplicateCode(AccountCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ChartError::UnknownAccount(AccountCode(9100)).to_string(),
            "Unknown account code: 9100"
        );
        assert_eq!(
            ChartError::CodeOutOfRange(AccountCode(600)).to_string(),
            "Account code 600 is outside the reserved ranges (1000-5999)"
        );
        assert_eq!(
            ChartError::DuplicateCode(AccountCode(1000)).to_string(),
            "Duplicate account code: 1000"
        );
    }
}
