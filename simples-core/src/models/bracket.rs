use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of a revenue bracket table, identified by its inclusive upper limit.
pub trait Bracket {
    fn upper_limit(&self) -> Decimal;
}

/// Row of the ALIQ1 table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliq1Bracket {
    /// Inclusive upper limit of the RBT12 range.
    pub upper_limit: Decimal,
    /// Nominal rate as a ratio (0.073 = 7.3%).
    pub nominal_rate: Decimal,
    /// Parcela a deduzir (PED), in reais.
    pub deduction: Decimal,
    /// Repartição applied to the effective rate, as a ratio.
    pub apportionment: Decimal,
}

impl Bracket for Aliq1Bracket {
    fn upper_limit(&self) -> Decimal {
        self.upper_limit
    }
}

/// Row of the ALIQ2 table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliq2Bracket {
    pub upper_limit: Decimal,
    /// Fixed percentage, already at two decimals (0.78 = 0.78%).
    pub aliq2_pct: Decimal,
}

impl Bracket for Aliq2Bracket {
    fn upper_limit(&self) -> Decimal {
        self.upper_limit
    }
}
