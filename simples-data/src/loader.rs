use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use simples_core::{Aliq1Bracket, Aliq2Bracket, BracketTable, BracketTableError};
use thiserror::Error;

use crate::revenue::ParseRevenueError;

/// Errors that can occur when loading tables or revenue batches.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid bracket table: {0}")]
    Table(#[from] BracketTableError),

    #[error("row {row}: {source}")]
    Revenue {
        row: usize,
        #[source]
        source: ParseRevenueError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single record from an ALIQ1 table CSV file.
///
/// - `upper_limit`: inclusive RBT12 limit of the bracket
/// - `nominal_rate`: nominal rate as a ratio (e.g., 0.073)
/// - `deduction`: parcela a deduzir in reais
/// - `apportionment`: repartição as a ratio (e.g., 0.34)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Aliq1Record {
    pub upper_limit: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
    pub apportionment: Decimal,
}

impl From<Aliq1Record> for Aliq1Bracket {
    fn from(record: Aliq1Record) -> Self {
        Aliq1Bracket {
            upper_limit: record.upper_limit,
            nominal_rate: record.nominal_rate,
            deduction: record.deduction,
            apportionment: record.apportionment,
        }
    }
}

/// A single record from an ALIQ2 table CSV file.
///
/// - `upper_limit`: inclusive RBT12 limit of the bracket
/// - `aliq2_pct`: fixed percentage (e.g., 0.78)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Aliq2Record {
    pub upper_limit: Decimal,
    pub aliq2_pct: Decimal,
}

impl From<Aliq2Record> for Aliq2Bracket {
    fn from(record: Aliq2Record) -> Self {
        Aliq2Bracket {
            upper_limit: record.upper_limit,
            aliq2_pct: record.aliq2_pct,
        }
    }
}

/// Loader for bracket tables stored as CSV.
///
/// Rows must be in ascending `upper_limit` order; the resulting table is
/// validated exactly like one built in code.
pub struct BracketTableLoader;

impl BracketTableLoader {
    fn read_records<R, T>(reader: R) -> Result<Vec<T>, LoaderError>
    where
        R: Read,
        T: for<'de> Deserialize<'de>,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: T = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse an ALIQ1 table from a CSV reader.
    pub fn parse_aliq1<R: Read>(reader: R) -> Result<BracketTable<Aliq1Bracket>, LoaderError> {
        let records: Vec<Aliq1Record> = Self::read_records(reader)?;
        let table = BracketTable::new(records.into_iter().map(Aliq1Bracket::from).collect())?;
        tracing::debug!(brackets = table.len(), "loaded aliq1 table");
        Ok(table)
    }

    /// Parse an ALIQ2 table from a CSV reader.
    pub fn parse_aliq2<R: Read>(reader: R) -> Result<BracketTable<Aliq2Bracket>, LoaderError> {
        let records: Vec<Aliq2Record> = Self::read_records(reader)?;
        let table = BracketTable::new(records.into_iter().map(Aliq2Bracket::from).collect())?;
        tracing::debug!(brackets = table.len(), "loaded aliq2 table");
        Ok(table)
    }

    pub fn load_aliq1(path: &Path) -> Result<BracketTable<Aliq1Bracket>, LoaderError> {
        Self::parse_aliq1(File::open(path)?)
    }

    pub fn load_aliq2(path: &Path) -> Result<BracketTable<Aliq2Bracket>, LoaderError> {
        Self::parse_aliq2(File::open(path)?)
    }
}
