//! Calculation engine for the Simples Nacional ALIQ1 and PR figures.
//!
//! The engine is a chain of pure functions over two static bracket tables:
//! ALIQ1 from the first table, the custom two-decimal rounding rule, ALIQ2
//! from the second table, and finally the reduction percentage (PR).
//! [`PgdasWorksheet`] runs the whole chain in one call.

pub mod calculations;
pub mod display;
pub mod models;

pub use calculations::{PgdasResult, PgdasWorksheet};
pub use models::*;
