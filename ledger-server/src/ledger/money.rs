//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are integer minor units (cents). Percentages arrive as `f64` and are
//! converted to `Decimal` before any multiplication; results are rounded
//! half-up (away from zero) to whole cents.

use rust_decimal::prelude::*;

/// Maximum accepted service price (1,000,000.00)
pub const MAX_SERVICE_PRICE: i64 = 100_000_000;

/// Maximum single advance (1,000,000.00)
pub const MAX_ADVANCE_AMOUNT: i64 = 100_000_000;

/// Minor units per major unit
const CENTS: i64 = 100;

/// `amount * percentage / 100`, rounded half-up to whole cents
pub fn percentage_of(amount: i64, percentage: f64) -> i64 {
    let Some(pct) = Decimal::from_f64(percentage) else {
        return 0;
    };
    let result = Decimal::from(amount) * pct / Decimal::ONE_HUNDRED;
    result
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Render minor units with two decimals (`3000` → `"30.00"`)
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / CENTS as u64, abs % CENTS as u64)
}
