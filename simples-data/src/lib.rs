//! CSV input for the Simples Nacional engine: alternative bracket tables
//! and batches of RBT12 values.

pub mod loader;
pub mod revenue;

pub use loader::{Aliq1Record, Aliq2Record, BracketTableLoader, LoaderError};
pub use revenue::{ParseRevenueError, RevenueBatch, RevenueRecord, parse_revenue};
