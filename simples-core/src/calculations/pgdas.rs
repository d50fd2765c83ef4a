//! The PGDAS worksheet: ALIQ1, its rounding, ALIQ2 and PR in one pass.
//!
//! # Worksheet Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | ALIQ1 ratio at full precision (first table) |
//! | 2    | ALIQ1 on the percentage scale (Step 1 × 100) |
//! | 3    | ALIQ1 rounded with the PGDAS rule (Step 2) |
//! | 4    | ALIQ2 percentage (second table) |
//! | 5    | Raw PR: ((Step 2 − Step 4) × 100) / Step 3 |
//! | 6    | PR rounded with the PGDAS rule (Step 5) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use simples_core::PgdasWorksheet;
//!
//! let worksheet = PgdasWorksheet::anexo_i();
//! let result = worksheet.calculate(dec!(200000.00));
//!
//! assert_eq!(result.aliq1_full_pct, dec!(1.4722));
//! assert_eq!(result.aliq1_rounded_pct, dec!(1.47));
//! assert_eq!(result.aliq2_pct, dec!(0.78));
//! assert_eq!(result.pr, dec!(47.09));
//! assert_eq!(result.aliq1_faixa, 2);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::aliq1::{calculate_aliq1_match, ratio_to_pct};
use crate::calculations::aliq2::find_aliq2;
use crate::calculations::common::custom_round;
use crate::calculations::reduction::calculate_pr;
use crate::display::format_percent;
use crate::models::{ANEXO_I_ALIQ1, ANEXO_I_ALIQ2, Aliq1Bracket, Aliq2Bracket, BracketTable};

/// Every intermediate and final value of one worksheet run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgdasResult {
    /// RBT12 as given.
    pub revenue: Decimal,

    /// Step 1: ALIQ1 as a ratio.
    pub aliq1_ratio: Decimal,

    /// Step 2: ALIQ1 percentage at full precision.
    pub aliq1_full_pct: Decimal,

    /// Step 3: ALIQ1 percentage after the rounding rule.
    pub aliq1_rounded_pct: Decimal,

    /// Step 4: ALIQ2 percentage.
    pub aliq2_pct: Decimal,

    /// Step 5: PR before rounding.
    pub pr_raw: Decimal,

    /// Step 6: PR after the rounding rule.
    pub pr: Decimal,

    /// 1-based ALIQ1 bracket used.
    pub aliq1_faixa: usize,

    /// 1-based ALIQ2 bracket used.
    pub aliq2_faixa: usize,

    /// Display label of the ALIQ2 range, e.g. `"< R$ 360.000"`.
    pub aliq2_label: String,
}

impl PgdasResult {
    /// False when RBT12 is zero or negative. The worksheet still completes
    /// with zero values; callers decide how to surface it.
    pub fn revenue_is_valid(&self) -> bool {
        self.revenue > Decimal::ZERO
    }

    /// PR as shown to the user, e.g. `"47.09"`.
    pub fn pr_display(&self) -> String {
        format_percent(self.pr)
    }
}

/// Calculator for the PGDAS worksheet.
///
/// Holds the two bracket tables; see [`PgdasWorksheet::anexo_i`] for the
/// built-in ones.
#[derive(Debug, Clone, Copy)]
pub struct PgdasWorksheet<'a> {
    aliq1_table: &'a BracketTable<Aliq1Bracket>,
    aliq2_table: &'a BracketTable<Aliq2Bracket>,
}

impl Default for PgdasWorksheet<'static> {
    fn default() -> Self {
        Self::anexo_i()
    }
}

impl PgdasWorksheet<'static> {
    /// Worksheet over the built-in Anexo I tables.
    pub fn anexo_i() -> Self {
        Self::new(&ANEXO_I_ALIQ1, &ANEXO_I_ALIQ2)
    }
}

impl<'a> PgdasWorksheet<'a> {
    pub fn new(
        aliq1_table: &'a BracketTable<Aliq1Bracket>,
        aliq2_table: &'a BracketTable<Aliq2Bracket>,
    ) -> Self {
        Self {
            aliq1_table,
            aliq2_table,
        }
    }

    pub fn aliq1_table(&self) -> &'a BracketTable<Aliq1Bracket> {
        self.aliq1_table
    }

    pub fn aliq2_table(&self) -> &'a BracketTable<Aliq2Bracket> {
        self.aliq2_table
    }

    /// Runs every step of the worksheet for `revenue`.
    ///
    /// Never fails: non-positive revenue produces an ALIQ1 of zero, which in
    /// turn produces a PR of zero.
    pub fn calculate(
        &self,
        revenue: Decimal,
    ) -> PgdasResult {
        let (aliq1_ratio, aliq1_match) = calculate_aliq1_match(self.aliq1_table, revenue);
        let aliq1_full_pct = ratio_to_pct(aliq1_ratio);
        let aliq1_rounded_pct = custom_round(aliq1_full_pct);

        let aliq2_match = find_aliq2(self.aliq2_table, revenue);
        let aliq2_pct = aliq2_match.bracket.aliq2_pct;

        let pr_raw = calculate_pr(aliq1_full_pct, aliq1_rounded_pct, aliq2_pct);
        let pr = custom_round(pr_raw);

        debug!(
            %revenue,
            %aliq1_full_pct,
            %aliq1_rounded_pct,
            %aliq2_pct,
            %pr_raw,
            %pr,
            "pgdas worksheet calculated"
        );

        PgdasResult {
            revenue,
            aliq1_ratio,
            aliq1_full_pct,
            aliq1_rounded_pct,
            aliq2_pct,
            pr_raw,
            pr,
            aliq1_faixa: aliq1_match.faixa,
            aliq2_faixa: aliq2_match.faixa,
            aliq2_label: aliq2_match.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn calc(revenue: Decimal) -> PgdasResult {
        PgdasWorksheet::anexo_i().calculate(revenue)
    }

    #[test]
    fn worked_example_200k() {
        let result = calc(dec!(200000.00));

        assert_eq!(result.aliq1_ratio, dec!(0.014722));
        assert_eq!(result.aliq1_full_pct, dec!(1.4722));
        assert_eq!(result.aliq1_rounded_pct, dec!(1.47));
        assert_eq!(result.aliq2_pct, dec!(0.78));
        assert_eq!(result.pr, dec!(47.09));
        assert_eq!(result.pr_display(), "47.09");
        assert_eq!(result.aliq1_faixa, 2);
        assert_eq!(result.aliq2_faixa, 2);
        assert_eq!(result.aliq2_label, "< R$ 360.000");
        assert!(result.revenue_is_valid());
    }

    #[test]
    fn first_bracket_100k() {
        let result = calc(dec!(100000));

        assert_eq!(result.aliq1_rounded_pct, dec!(1.36));
        assert_eq!(result.aliq2_pct, dec!(0.70));
        // 66 / 1.36 = 48.5294...
        assert_eq!(result.pr, dec!(48.53));
    }

    #[test]
    fn third_bracket_500k() {
        let result = calc(dec!(500000));

        assert_eq!(result.aliq1_full_pct, dec!(2.25388));
        assert_eq!(result.aliq1_rounded_pct, dec!(2.25));
        assert_eq!(result.aliq2_pct, dec!(0.99));
        assert_eq!(result.pr, dec!(56.17));
    }

    #[test]
    fn fourth_bracket_1m() {
        let result = calc(dec!(1000000));

        assert_eq!(result.aliq1_rounded_pct, dec!(2.83));
        assert_eq!(result.aliq2_pct, dec!(2.65));
        assert_eq!(result.pr, dec!(6.39));
    }

    #[test]
    fn ceiling_3_6m_bumps_rounded_aliq1() {
        let result = calc(dec!(3600000));

        // 3.978125: checker 81 > 55
        assert_eq!(result.aliq1_rounded_pct, dec!(3.98));
        assert_eq!(result.aliq2_pct, dec!(3.95));
        assert_eq!(result.pr, dec!(0.71));
        assert_eq!(result.aliq2_label, "< R$ 3.600.000");
    }

    #[test]
    fn above_ceiling_uses_open_ended_brackets() {
        let result = calc(dec!(5000000));

        // 4.20559: checker 55 is not above the threshold
        assert_eq!(result.aliq1_rounded_pct, dec!(4.20));
        assert_eq!(result.aliq2_pct, dec!(3.95));
        assert_eq!(result.pr, dec!(6.08));
        assert_eq!(result.aliq1_faixa, 5);
        assert_eq!(result.aliq2_faixa, 20);
        assert_eq!(result.aliq2_label, "Máxima");
    }

    #[test]
    fn zero_revenue_is_all_zero() {
        let result = calc(Decimal::ZERO);

        assert_eq!(result.aliq1_ratio, Decimal::ZERO);
        assert_eq!(result.aliq1_rounded_pct, Decimal::ZERO);
        assert_eq!(result.pr, Decimal::ZERO);
        assert_eq!(result.pr_display(), "0.00");
        assert!(!result.revenue_is_valid());
    }

    #[test]
    fn negative_revenue_is_all_zero() {
        let result = calc(dec!(-100));

        assert_eq!(result.pr, Decimal::ZERO);
        assert!(!result.revenue_is_valid());
    }

    #[test]
    fn full_and_rounded_aliq1_stay_distinct() {
        let result = calc(dec!(200000));

        assert!(result.aliq1_full_pct != result.aliq1_rounded_pct);
        assert_eq!(result.pr_raw, calculate_pr(dec!(1.4722), dec!(1.47), dec!(0.78)));
    }

    #[test]
    fn stages_agree_with_the_standalone_operations() {
        use crate::calculations::{calculate_aliq1, lookup_aliq2};

        for revenue in [dec!(-1), dec!(0), dec!(180000), dec!(180000.01), dec!(750000), dec!(3600001)] {
            let result = calc(revenue);

            assert_eq!(result.aliq1_ratio, calculate_aliq1(revenue));
            assert_eq!(result.aliq2_pct, lookup_aliq2(revenue));
            assert_eq!(result.aliq1_faixa, ANEXO_I_ALIQ1.find(revenue).faixa);
        }
    }

    #[test]
    fn custom_tables_are_used() {
        let aliq1 = BracketTable::new(vec![Aliq1Bracket {
            upper_limit: dec!(1000),
            nominal_rate: dec!(0.10),
            deduction: dec!(0),
            apportionment: dec!(0.5),
        }])
        .unwrap();
        let aliq2 = BracketTable::new(vec![Aliq2Bracket {
            upper_limit: dec!(1000),
            aliq2_pct: dec!(1.00),
        }])
        .unwrap();

        let result = PgdasWorksheet::new(&aliq1, &aliq2).calculate(dec!(500));

        // ALIQ1 = 5%, PR = (5 − 1) × 100 / 5
        assert_eq!(result.aliq1_full_pct, dec!(5));
        assert_eq!(result.pr, dec!(80));
    }
}
