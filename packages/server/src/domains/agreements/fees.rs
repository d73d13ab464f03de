//! Platform fee arithmetic.
//!
//! The platform fee is always derived from the two inputs, never accepted
//! from a caller. Money is integer cents; the percent is a two-decimal
//! `Decimal` so 15.00% of $100.00 is exactly 1500 cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::ServiceError;

/// `round(monthly_fee_cents * platform_fee_percent / 100)`, half away from
/// zero.
pub fn platform_fee_cents(monthly_fee_cents: i64, platform_fee_percent: Decimal) -> i64 {
    let fee = Decimal::from(monthly_fee_cents) * platform_fee_percent / Decimal::from(100);
    // A percent in 0-100 keeps the product within i64 range.
    fee.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Validate the two fee inputs before any write.
pub fn validate_fee_inputs(
    monthly_fee_cents: i64,
    platform_fee_percent: Decimal,
) -> Result<(), ServiceError> {
    if monthly_fee_cents < 0 {
        return Err(ServiceError::validation(
            "monthly_fee_cents must not be negative",
        ));
    }
    if platform_fee_percent < Decimal::ZERO || platform_fee_percent > Decimal::from(100) {
        return Err(ServiceError::validation(
            "platform_fee_percent must be between 0 and 100",
        ));
    }
    Ok(())
}
