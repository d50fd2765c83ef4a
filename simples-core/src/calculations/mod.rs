//! Calculation modules for the PGDAS ALIQ1/PR figures.
//!
//! Each stage is a pure function over a bracket table. The free functions
//! use the built-in Anexo I tables; the `_with` variants take any table.

pub mod aliq1;
pub mod aliq2;
pub mod common;
pub mod float;
pub mod pgdas;
pub mod reduction;

pub use aliq1::{calculate_aliq1, calculate_aliq1_match, calculate_aliq1_with, ratio_to_pct};
pub use aliq2::{find_aliq2, lookup_aliq2, lookup_aliq2_with};
pub use common::custom_round;
pub use pgdas::{PgdasResult, PgdasWorksheet};
pub use reduction::calculate_pr;
