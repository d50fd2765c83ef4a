//! Formatting helpers for callers that present worksheet values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a percentage-scale value with exactly two decimals, e.g. `"47.09"`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::display::format_percent;
///
/// assert_eq!(format_percent(dec!(47.09)), "47.09");
/// assert_eq!(format_percent(dec!(0.7)), "0.70");
/// assert_eq!(format_percent(dec!(0)), "0.00");
/// ```
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Formats an amount the pt-BR way: `.` groups thousands, `,` separates
/// `decimals` fractional digits.
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::display::format_brl;
///
/// assert_eq!(format_brl(dec!(1234567.891), 2), "1.234.567,89");
/// assert_eq!(format_brl(dec!(360000), 0), "360.000");
/// ```
pub fn format_brl(
    value: Decimal,
    decimals: u32,
) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}
