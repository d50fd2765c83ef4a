//! Built-in Anexo I tables.
//!
//! | Faixa | RBT12 up to  | Nominal | PED       | Repartição |
//! |-------|--------------|---------|-----------|------------|
//! | 1     | 180.000,00   | 4,0%    | 0,00      | 34,0%      |
//! | 2     | 360.000,00   | 7,3%    | 5.940,00  | 34,0%      |
//! | 3     | 720.000,00   | 9,5%    | 13.860,00 | 33,5%      |
//! | 4     | 1.800.000,00 | 10,7%   | 22.500,00 | 33,5%      |
//! | 5     | 3.600.000,00 | 14,3%   | 87.300,00 | 33,5%      |
//!
//! The ALIQ2 table splits the same range into twenty steps of 180.000,00.

use rust_decimal_macros::dec;

use super::bracket::{Aliq1Bracket, Aliq2Bracket};
use super::bracket_table::BracketTable;

static ALIQ1_ROWS: [Aliq1Bracket; 5] = [
    Aliq1Bracket {
        upper_limit: dec!(180000.00),
        nominal_rate: dec!(0.040),
        deduction: dec!(0.00),
        apportionment: dec!(0.34),
    },
    Aliq1Bracket {
        upper_limit: dec!(360000.00),
        nominal_rate: dec!(0.073),
        deduction: dec!(5940.00),
        apportionment: dec!(0.34),
    },
    Aliq1Bracket {
        upper_limit: dec!(720000.00),
        nominal_rate: dec!(0.095),
        deduction: dec!(13860.00),
        apportionment: dec!(0.335),
    },
    Aliq1Bracket {
        upper_limit: dec!(1800000.00),
        nominal_rate: dec!(0.107),
        deduction: dec!(22500.00),
        apportionment: dec!(0.335),
    },
    Aliq1Bracket {
        upper_limit: dec!(3600000.00),
        nominal_rate: dec!(0.143),
        deduction: dec!(87300.00),
        apportionment: dec!(0.335),
    },
];

macro_rules! aliq2 {
    ($limit:tt, $pct:tt) => {
        Aliq2Bracket {
            upper_limit: dec!($limit),
            aliq2_pct: dec!($pct),
        }
    };
}

static ALIQ2_ROWS: [Aliq2Bracket; 20] = [
    aliq2!(180000.00, 0.70),
    aliq2!(360000.00, 0.78),
    aliq2!(540000.00, 0.99),
    aliq2!(720000.00, 1.50),
    aliq2!(900000.00, 2.50),
    aliq2!(1080000.00, 2.65),
    aliq2!(1260000.00, 2.75),
    aliq2!(1440000.00, 2.80),
    aliq2!(1620000.00, 2.95),
    aliq2!(1800000.00, 3.05),
    aliq2!(1980000.00, 3.21),
    aliq2!(2160000.00, 3.30),
    aliq2!(2340000.00, 3.40),
    aliq2!(2520000.00, 3.48),
    aliq2!(2700000.00, 3.51),
    aliq2!(2880000.00, 3.63),
    aliq2!(3060000.00, 3.75),
    aliq2!(3240000.00, 3.83),
    aliq2!(3420000.00, 3.91),
    aliq2!(3600000.00, 3.95),
];

/// ALIQ1 brackets: nominal rate, PED and repartição per RBT12 range.
pub static ANEXO_I_ALIQ1: BracketTable<Aliq1Bracket> = BracketTable::from_static(&ALIQ1_ROWS);

/// ALIQ2 brackets: fixed percentage per RBT12 range.
pub static ANEXO_I_ALIQ2: BracketTable<Aliq2Bracket> = BracketTable::from_static(&ALIQ2_ROWS);
