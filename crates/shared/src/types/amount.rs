//! Currency-precision amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary amounts are `rust_decimal::Decimal` at a fixed scale.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by every monetary amount.
pub const CURRENCY_SCALE: u32 = 2;

/// Returns true if `amount` fits within [`CURRENCY_SCALE`] decimal places.
///
/// An amount such as `10.005` cannot be represented in the smallest
/// currency unit and must be rejected rather than silently rounded.
#[must_use]
pub fn is_currency_precision(amount: Decimal) -> bool {
    amount.round_dp(CURRENCY_SCALE) == amount
}

/// Rounds a derived amount to currency precision using banker's rounding.
///
/// Only for amounts the system computes itself (e.g. statement margins);
/// caller-supplied line amounts are validated, never rounded.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven)
}
