//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then
//! converted to `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding: 2 decimal places, half-up
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per cart line
pub const MAX_QUANTITY: i64 = 9999;

/// f64 → Decimal. Non-finite input collapses to zero; callers
/// validate before converting.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Decimal → f64, rounded to 2 dp half-up
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}

/// Round a monetary value to 2 dp half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit_price * quantity` as an exact Decimal
pub fn line_total(unit_price: f64, quantity: i64) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Fixed 2-dp rendering for reports ("25.50", "150.00")
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}
