//! `f64` entry points for callers that work in floating point.
//!
//! Values are converted to [`Decimal`] and run through the same functions
//! as the rest of the crate. Inputs that cannot be represented (NaN,
//! infinities, magnitudes beyond `Decimal`) never panic: see each function.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::{calculate_aliq1, calculate_pr, custom_round, lookup_aliq2};
use crate::display::format_percent;
use crate::models::ANEXO_I_ALIQ2;

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// ALIQ1 ratio for `revenue`. Unrepresentable revenue yields `0.0`.
pub fn calculate_aliq1_f64(revenue: f64) -> f64 {
    Decimal::from_f64(revenue)
        .map(calculate_aliq1)
        .map(to_f64)
        .unwrap_or(0.0)
}

/// ALIQ2 percentage for `revenue`.
///
/// NaN and values above the `Decimal` range fall into the last bracket,
/// values below it into the first.
pub fn lookup_aliq2_f64(revenue: f64) -> f64 {
    let aliq2 = match Decimal::from_f64(revenue) {
        Some(revenue) => lookup_aliq2(revenue),
        None if revenue < 0.0 => ANEXO_I_ALIQ2.as_slice()[0].aliq2_pct,
        None => ANEXO_I_ALIQ2.find(Decimal::MAX).bracket.aliq2_pct,
    };
    to_f64(aliq2)
}

/// The PGDAS rounding rule on a percentage. Non-finite values are returned
/// unchanged so the display layer can replace them.
pub fn custom_round_f64(value: f64) -> f64 {
    match Decimal::from_f64(value) {
        Some(value) => to_f64(custom_round(value)),
        None => value,
    }
}

/// Raw PR from percentages. Any unrepresentable argument yields `0.0`.
pub fn calculate_pr_f64(
    aliq1_full_pct: f64,
    aliq1_rounded_pct: f64,
    aliq2_pct: f64,
) -> f64 {
    let args = (
        Decimal::from_f64(aliq1_full_pct),
        Decimal::from_f64(aliq1_rounded_pct),
        Decimal::from_f64(aliq2_pct),
    );
    match args {
        (Some(full), Some(rounded), Some(aliq2)) => to_f64(calculate_pr(full, rounded, aliq2)),
        _ => 0.0,
    }
}

/// Two-decimal display of a percentage; NaN and infinities show `"0.00"`.
pub fn format_percent_f64(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    Decimal::from_f64(value)
        .map(format_percent)
        .unwrap_or_else(|| format!("{value:.2}"))
}
