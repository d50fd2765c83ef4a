//! ALIQ1: the effective rate from the first bracket table.
//!
//! ```text
//! ALIQ1 = ((RBT12 × nominal rate) − PED) / RBT12 × repartição
//! ```
//!
//! The result is a ratio at full precision (0.014722 = 1.4722%). No
//! rounding happens here; [`super::custom_round`] is applied later, on the
//! percentage scale, and only for the value used as the PR denominator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::models::{ANEXO_I_ALIQ1, Aliq1Bracket, BracketMatch, BracketTable};

/// Calculates ALIQ1 for `revenue` with the built-in Anexo I table.
///
/// Returns zero for `revenue <= 0`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::calculate_aliq1;
///
/// assert_eq!(calculate_aliq1(dec!(200000)), dec!(0.014722));
/// assert_eq!(calculate_aliq1(dec!(0)), dec!(0));
/// ```
pub fn calculate_aliq1(revenue: Decimal) -> Decimal {
    calculate_aliq1_with(&ANEXO_I_ALIQ1, revenue)
}

/// Calculates ALIQ1 for `revenue` against `table`.
///
/// Revenue above the last limit uses the last bracket. Arithmetic overflow
/// yields zero.
pub fn calculate_aliq1_with(
    table: &BracketTable<Aliq1Bracket>,
    revenue: Decimal,
) -> Decimal {
    calculate_aliq1_match(table, revenue).0
}

/// Like [`calculate_aliq1_with`], also returning the bracket the revenue
/// fell into.
pub fn calculate_aliq1_match(
    table: &BracketTable<Aliq1Bracket>,
    revenue: Decimal,
) -> (Decimal, BracketMatch<'_, Aliq1Bracket>) {
    let found = table.find(revenue);
    if revenue <= Decimal::ZERO {
        return (Decimal::ZERO, found);
    }

    let rate = match effective_rate(found.bracket, revenue) {
        Some(rate) => {
            debug!(%revenue, faixa = found.faixa, %rate, "aliq1 calculated");
            rate
        }
        None => {
            warn!(%revenue, faixa = found.faixa, "aliq1 overflowed, using zero");
            Decimal::ZERO
        }
    };
    (rate, found)
}

/// Converts a ratio to the percentage scale (0.014722 -> 1.4722).
/// Overflow yields zero.
pub fn ratio_to_pct(ratio: Decimal) -> Decimal {
    ratio.checked_mul(dec!(100)).unwrap_or_else(|| {
        warn!(%ratio, "percentage overflowed, using zero");
        Decimal::ZERO
    })
}

fn effective_rate(
    bracket: &Aliq1Bracket,
    revenue: Decimal,
) -> Option<Decimal> {
    let gross = revenue.checked_mul(bracket.nominal_rate)?;
    let net = gross.checked_sub(bracket.deduction)?;
    let rate = net.checked_div(revenue)?;
    rate.checked_mul(bracket.apportionment)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Closed-form ALIQ1 for a bracket, for comparison.
    fn closed_form(
        revenue: Decimal,
        nominal: Decimal,
        ped: Decimal,
        reparticao: Decimal,
    ) -> Decimal {
        ((revenue * nominal) - ped) / revenue * reparticao
    }

    #[test]
    fn zero_revenue_yields_zero() {
        assert_eq!(calculate_aliq1(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn negative_revenue_yields_zero() {
        assert_eq!(calculate_aliq1(dec!(-1)), Decimal::ZERO);
        assert_eq!(calculate_aliq1(dec!(-250000)), Decimal::ZERO);
    }

    #[test]
    fn first_bracket_has_no_deduction() {
        // 4% × 34% regardless of revenue.
        assert_eq!(calculate_aliq1(dec!(100000)), dec!(0.0136));
        assert_eq!(calculate_aliq1(dec!(0.01)), dec!(0.0136));
    }

    #[test]
    fn second_bracket_matches_worked_example() {
        // ((200000 × 0.073) − 5940) / 200000 × 0.34
        assert_eq!(calculate_aliq1(dec!(200000.00)), dec!(0.014722));
    }

    #[test]
    fn upper_limit_stays_in_its_bracket() {
        assert_eq!(calculate_aliq1(dec!(180000.00)), dec!(0.0136));
    }

    #[test]
    fn each_bracket_matches_closed_form() {
        let cases = [
            (dec!(150000), dec!(0.040), dec!(0), dec!(0.34)),
            (dec!(300000), dec!(0.073), dec!(5940), dec!(0.34)),
            (dec!(500000), dec!(0.095), dec!(13860), dec!(0.335)),
            (dec!(1000000), dec!(0.107), dec!(22500), dec!(0.335)),
            (dec!(2500000), dec!(0.143), dec!(87300), dec!(0.335)),
        ];

        for (revenue, nominal, ped, reparticao) in cases {
            let expected = closed_form(revenue, nominal, ped, reparticao);
            let diff = (calculate_aliq1(revenue) - expected).abs();
            assert!(diff < dec!(0.000000001), "revenue {revenue}: diff {diff}");
        }
    }

    #[test]
    fn known_values_per_bracket() {
        assert_eq!(calculate_aliq1(dec!(500000)), dec!(0.0225388));
        assert_eq!(calculate_aliq1(dec!(1000000)), dec!(0.0283075));
        assert_eq!(calculate_aliq1(dec!(3600000)), dec!(0.03978125));
    }

    #[test]
    fn revenue_above_ceiling_uses_last_bracket() {
        let expected = closed_form(dec!(5000000), dec!(0.143), dec!(87300), dec!(0.335));

        assert_eq!(calculate_aliq1(dec!(5000000)), expected);
        assert_eq!(calculate_aliq1(dec!(5000000)), dec!(0.0420559));
    }

    #[test]
    fn custom_table_is_used() {
        let table = BracketTable::new(vec![Aliq1Bracket {
            upper_limit: dec!(1000),
            nominal_rate: dec!(0.10),
            deduction: dec!(10),
            apportionment: dec!(0.5),
        }])
        .unwrap();

        // ((1000 × 0.10) − 10) / 1000 × 0.5
        assert_eq!(calculate_aliq1_with(&table, dec!(1000)), dec!(0.045));
    }

    #[test]
    fn overflow_falls_back_to_zero() {
        let table = BracketTable::new(vec![Aliq1Bracket {
            upper_limit: dec!(1),
            nominal_rate: Decimal::MAX,
            deduction: dec!(0),
            apportionment: dec!(1),
        }])
        .unwrap();

        assert_eq!(calculate_aliq1_with(&table, dec!(10)), Decimal::ZERO);
    }

    #[test]
    fn match_reports_the_bracket_used() {
        let (rate, found) = calculate_aliq1_match(&ANEXO_I_ALIQ1, dec!(200000));

        assert_eq!(rate, dec!(0.014722));
        assert_eq!(found.faixa, 2);
        assert_eq!(found.bracket.deduction, dec!(5940));
    }

    #[test]
    fn match_for_zero_revenue_still_has_a_bracket() {
        let (rate, found) = calculate_aliq1_match(&ANEXO_I_ALIQ1, Decimal::ZERO);

        assert_eq!(rate, Decimal::ZERO);
        assert_eq!(found.faixa, 1);
    }

    #[test]
    fn ratio_to_pct_overflow_falls_back_to_zero() {
        assert_eq!(ratio_to_pct(Decimal::MAX), Decimal::ZERO);
    }

    #[test]
    fn ratio_to_pct_scales_by_hundred() {
        assert_eq!(ratio_to_pct(dec!(0.014722)), dec!(1.4722));
        assert_eq!(ratio_to_pct(Decimal::ZERO), Decimal::ZERO);
    }
}
