//! ALIQ2: the fixed percentage from the second bracket table.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{ANEXO_I_ALIQ2, Aliq2Bracket, BracketMatch, BracketTable};

/// Looks up ALIQ2 (a percentage, e.g. `0.78`) with the built-in table.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use simples_core::calculations::lookup_aliq2;
///
/// assert_eq!(lookup_aliq2(dec!(200000)), dec!(0.78));
/// assert_eq!(lookup_aliq2(dec!(9000000)), dec!(3.95));
/// ```
pub fn lookup_aliq2(revenue: Decimal) -> Decimal {
    lookup_aliq2_with(&ANEXO_I_ALIQ2, revenue)
}

/// Looks up ALIQ2 in `table`. The table value is returned as stored.
pub fn lookup_aliq2_with(
    table: &BracketTable<Aliq2Bracket>,
    revenue: Decimal,
) -> Decimal {
    find_aliq2(table, revenue).bracket.aliq2_pct
}

/// Finds the ALIQ2 bracket for `revenue`, for callers that also show the
/// bracket number or label.
pub fn find_aliq2(
    table: &BracketTable<Aliq2Bracket>,
    revenue: Decimal,
) -> BracketMatch<'_, Aliq2Bracket> {
    let found = table.find(revenue);
    debug!(%revenue, faixa = found.faixa, aliq2 = %found.bracket.aliq2_pct, "aliq2 found");
    found
}
