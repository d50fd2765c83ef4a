//! PR (percentual de redução).
//!
//! ```text
//! PR = ((ALIQ1 full precision − ALIQ2) × 100) / ALIQ1 rounded
//! ```
//!
//! The numerator takes ALIQ1 at full precision and the denominator takes
//! ALIQ1 after [`super::custom_round`]. Both values must be carried
//! separately up to this point.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

/// Calculates the raw PR, all arguments on the percentage scale.
///
/// Returns zero when `aliq1_rounded_pct` is zero, and on overflow.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::{calculate_pr, custom_round};
///
/// let pr = calculate_pr(dec!(1.4722), dec!(1.47), dec!(0.78));
/// assert_eq!(custom_round(pr), dec!(47.09));
///
/// assert_eq!(calculate_pr(dec!(1.4722), dec!(0), dec!(0.78)), dec!(0));
/// ```
pub fn calculate_pr(
    aliq1_full_pct: Decimal,
    aliq1_rounded_pct: Decimal,
    aliq2_pct: Decimal,
) -> Decimal {
    if aliq1_rounded_pct.is_zero() {
        return Decimal::ZERO;
    }

    let pr = aliq1_full_pct
        .checked_sub(aliq2_pct)
        .and_then(|diff| diff.checked_mul(dec!(100)))
        .and_then(|numerator| numerator.checked_div(aliq1_rounded_pct));

    pr.unwrap_or_else(|| {
        warn!(%aliq1_full_pct, %aliq1_rounded_pct, %aliq2_pct, "pr overflowed, using zero");
        Decimal::ZERO
    })
}
