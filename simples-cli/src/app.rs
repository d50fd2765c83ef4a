//! Commands of the `simples` binary, written against `Read`/`Write` so they
//! can be driven from tests.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use simples_core::{
    ANEXO_I_ALIQ1, ANEXO_I_ALIQ2, Aliq1Bracket, Aliq2Bracket, BracketTable, PgdasResult,
    PgdasWorksheet,
};
use simples_data::{BracketTableLoader, RevenueBatch, parse_revenue};
use tracing::{info, warn};

use crate::config::TablesConfig;
use crate::report::{BatchRow, WorksheetReport, write_batch_csv, write_tables};

/// The pair of bracket tables a run works with.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub aliq1: BracketTable<Aliq1Bracket>,
    pub aliq2: BracketTable<Aliq2Bracket>,
}

impl Default for TableSet {
    fn default() -> Self {
        Self::anexo_i()
    }
}

impl TableSet {
    /// The built-in tables. Cloning a static table does not copy rows.
    pub fn anexo_i() -> Self {
        Self {
            aliq1: ANEXO_I_ALIQ1.clone(),
            aliq2: ANEXO_I_ALIQ2.clone(),
        }
    }

    /// Built-in tables, each replaced by its CSV file when configured.
    pub fn load(config: &TablesConfig) -> Result<Self> {
        let mut tables = Self::anexo_i();

        if let Some(path) = &config.aliq1 {
            tables.aliq1 = BracketTableLoader::load_aliq1(path)
                .with_context(|| format!("Failed to load ALIQ1 table: {}", path.display()))?;
            info!(path = %path.display(), brackets = tables.aliq1.len(), "using custom aliq1 table");
        }
        if let Some(path) = &config.aliq2 {
            tables.aliq2 = BracketTableLoader::load_aliq2(path)
                .with_context(|| format!("Failed to load ALIQ2 table: {}", path.display()))?;
            info!(path = %path.display(), brackets = tables.aliq2.len(), "using custom aliq2 table");
        }

        Ok(tables)
    }

    pub fn worksheet(&self) -> PgdasWorksheet<'_> {
        PgdasWorksheet::new(&self.aliq1, &self.aliq2)
    }
}

/// `calc`: parses one RBT12 value and prints its worksheet.
pub fn run_calc<W: Write>(
    tables: &TableSet,
    rbt12: &str,
    out: &mut W,
) -> Result<PgdasResult> {
    let revenue = parse_revenue(rbt12)?;
    let result = tables.worksheet().calculate(revenue);

    if !result.revenue_is_valid() {
        warn!(%revenue, "RBT12 must be greater than zero; results are zero");
    }

    writeln!(out, "{}", WorksheetReport(&result))?;
    Ok(result)
}

/// `batch`: computes every row of a revenue CSV and writes the report CSV.
/// Returns the number of rows written.
pub fn run_batch<R: Read, W: Write>(
    tables: &TableSet,
    input: R,
    output: W,
) -> Result<usize> {
    let records = RevenueBatch::parse(input).context("Failed to read revenue batch")?;
    let worksheet = tables.worksheet();

    let rows: Vec<BatchRow> = records
        .iter()
        .map(|record| {
            let result = worksheet.calculate(record.rbt12);
            if !result.revenue_is_valid() {
                warn!(row = record.row, revenue = %record.rbt12, "RBT12 must be greater than zero");
            }
            BatchRow::new(record.row, record.label.as_deref(), &result)
        })
        .collect();

    write_batch_csv(output, &rows).context("Failed to write batch report")?;
    info!(rows = rows.len(), "batch complete");
    Ok(rows.len())
}

/// `tables`: prints the tables in use.
pub fn run_tables<W: Write>(
    tables: &TableSet,
    out: &mut W,
) -> Result<()> {
    write_tables(out, &tables.aliq1, &tables.aliq2)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn calc_accepts_pt_br_input() {
        let mut out = Vec::new();

        let result = run_calc(&TableSet::anexo_i(), "R$ 200.000,00", &mut out).unwrap();

        assert_eq!(result.pr, dec!(47.09));
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("PR:                 47.09%\n"));
    }

    #[test]
    fn calc_reads_symbol_amount_without_cents() {
        let mut out = Vec::new();

        let result = run_calc(&TableSet::anexo_i(), "R$ 360.000", &mut out).unwrap();

        assert_eq!(result.revenue, dec!(360000));
        assert_eq!(result.aliq1_faixa, 2);
    }

    #[test]
    fn calc_zero_revenue_still_prints() {
        let mut out = Vec::new();

        let result = run_calc(&TableSet::anexo_i(), "0", &mut out).unwrap();

        assert!(!result.revenue_is_valid());
        assert!(String::from_utf8(out).unwrap().contains("PR:                 0.00%"));
    }

    #[test]
    fn calc_rejects_unparseable_input() {
        let mut out = Vec::new();

        assert!(run_calc(&TableSet::anexo_i(), "duzentos mil", &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn batch_counts_rows() {
        let input = "rbt12\n100000\n200000\n";
        let mut out = Vec::new();

        let count = run_batch(&TableSet::anexo_i(), input.as_bytes(), &mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[test]
    fn default_table_set_is_anexo_i() {
        let tables = TableSet::load(&TablesConfig::default()).unwrap();

        assert_eq!(tables.aliq1, ANEXO_I_ALIQ1);
        assert_eq!(tables.aliq2.len(), 20);
    }
}
