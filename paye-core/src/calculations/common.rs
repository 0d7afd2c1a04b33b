//! Common utility functions for PAYE calculations.
//!
//! This module provides the clamping helpers used by the engine and the
//! currency formatting used when results are rendered as text.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Currency symbol used in rendered amounts.
pub const NAIRA: &str = "₦";

/// Pay periods in a year for monthly figures.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::min;
///
/// assert_eq!(min(dec!(1000000), dec!(500000)), dec!(500000));
/// ```
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Rounds to the nearest whole currency unit, halves away from zero.
///
/// Only used for display; the engine never rounds its own arithmetic.
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as whole naira with thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::format_naira;
///
/// assert_eq!(format_naira(dec!(1234567.5)), "₦1,234,568");
/// assert_eq!(format_naira(dec!(-2500)), "-₦2,500");
/// ```
pub fn format_naira(value: Decimal) -> String {
    let rounded = round_to_unit(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{NAIRA}{grouped}")
    } else {
        format!("{NAIRA}{grouped}")
    }
}

/// Formats a fraction as a percentage with up to two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::format_percent;
///
/// assert_eq!(format_percent(dec!(0.20)), "20%");
/// assert_eq!(format_percent(dec!(0.025)), "2.5%");
/// ```
pub fn format_percent(rate: Decimal) -> String {
    let percent = rate
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{percent}%")
}
