//! The two-decimal rounding rule used for ALIQ1 and PR.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

/// Fractional digits rendered before the rule inspects them.
const FIXED_DIGITS: u32 = 10;

/// The checker (third and fourth fractional digits) must exceed this to
/// bump the second digit.
const CHECKER_THRESHOLD: i128 = 55;

/// Rounds a percentage-scale value to two decimals with the PGDAS rule.
///
/// The value is first fixed at ten fractional digits. The first two
/// fractional digits form `base`, the third and fourth form `checker`.
/// When `checker > 55`, `base` goes up by one; everything past the second
/// digit is then dropped. The result is `integer part + base / 100`.
///
/// A `base` of 99 with a high checker becomes `integer + 1.00`. For a
/// negative value the fraction is still added, so `-3.4567` yields `-2.54`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::custom_round;
///
/// assert_eq!(custom_round(dec!(3.4555)), dec!(3.45)); // checker 55 keeps base
/// assert_eq!(custom_round(dec!(3.4556)), dec!(3.46)); // checker 56 bumps base
/// assert_eq!(custom_round(dec!(1.4722)), dec!(1.47));
/// ```
pub fn custom_round(value: Decimal) -> Decimal {
    let fixed = value.round_dp_with_strategy(FIXED_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    let integer = fixed.trunc();
    let fraction = (fixed - integer).abs();

    // First four fractional digits as an integer in 0..=9999.
    let digits = (fraction * dec!(10000)).trunc().mantissa();
    let mut base = digits / 100;
    let checker = digits % 100;

    if checker > CHECKER_THRESHOLD {
        base += 1;
    }

    integer
        .checked_add(Decimal::new(base as i64, 2))
        .unwrap_or_else(|| {
            warn!(%value, "rounded value overflowed, keeping integer part");
            integer
        })
}
