use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::LoaderError;

/// Error returned when a string cannot be parsed as a revenue amount.
#[derive(Debug, Error)]
#[error("invalid revenue '{input}': {source}")]
pub struct ParseRevenueError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips the currency symbol and converts pt-BR separators.
///
/// A comma marks pt-BR input (`1.234,56`): dots are dropped and the comma
/// becomes the decimal point. Without a comma, dots are thousands
/// separators when the amount carried `R$`, when there are several of
/// them (`1.234.567`), or when exactly three digits follow a single dot
/// (`1.500`). Anything else keeps the dot as the decimal point.
fn normalize_revenue_input(s: &str) -> String {
    let trimmed = s.trim();
    let (has_symbol, trimmed) = match trimmed.strip_prefix("R$") {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.contains(',') {
        return compact.replace('.', "").replace(',', ".");
    }

    let grouped = match compact.split_once('.') {
        None => false,
        Some((_, rest)) => {
            has_symbol
                || rest.contains('.')
                || (rest.len() == 3 && rest.chars().all(|c| c.is_ascii_digit()))
        }
    };
    if grouped {
        compact.replace('.', "")
    } else {
        compact
    }
}

/// Parses an RBT12 amount.
///
/// Accepts `R$ 1.234,56`, `R$ 360.000`, `1234,56`, `1234.56`, `1.500` and
/// `1.234.567`. Empty or whitespace-only input is treated as 0.
pub fn parse_revenue(s: &str) -> Result<Decimal, ParseRevenueError> {
    let normalized = normalize_revenue_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid revenue: {}", e);
        ParseRevenueError {
            input: s.to_string(),
            source: e,
        }
    })
}

#[derive(Debug, Deserialize)]
struct RevenueRow {
    #[serde(default)]
    label: Option<String>,
    rbt12: String,
}

/// One revenue read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueRecord {
    /// 1-based data row (header excluded).
    pub row: usize,
    pub label: Option<String>,
    pub rbt12: Decimal,
}

/// Reader for batch files.
///
/// | Column  | Required | Notes                                  |
/// |---------|----------|----------------------------------------|
/// | `rbt12` | yes      | Any format accepted by [`parse_revenue`] |
/// | `label` | no       | Free text carried to the report        |
///
/// ```csv
/// label,rbt12
/// Loja Centro,200000.00
/// Filial,"R$ 1.000.000,00"
/// ```
pub struct RevenueBatch;

impl RevenueBatch {
    /// Parses batch rows in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RevenueRecord>, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .deserialize::<RevenueRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                let row_number = idx + 1;
                let rbt12 = parse_revenue(&row.rbt12).map_err(|source| LoaderError::Revenue {
                    row: row_number,
                    source,
                })?;
                Ok(RevenueRecord {
                    row: row_number,
                    label: row.label.filter(|l| !l.is_empty()),
                    rbt12,
                })
            })
            .collect()
    }

    /// Convenience wrapper: open `path` and delegate to [`RevenueBatch::parse`].
    pub fn load_from_file(path: &Path) -> Result<Vec<RevenueRecord>, LoaderError> {
        let file = File::open(path)?;
        Self::parse(file)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_revenue_plain_decimal() {
        assert_eq!(parse_revenue("200000.00").unwrap(), dec!(200000.00));
        assert_eq!(parse_revenue("  1234.5 ").unwrap(), dec!(1234.5));
    }

    #[test]
    fn parse_revenue_pt_br() {
        assert_eq!(parse_revenue("R$ 1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_revenue("200.000,00").unwrap(), dec!(200000.00));
        assert_eq!(parse_revenue("0,5").unwrap(), dec!(0.5));
    }

    #[test]
    fn parse_revenue_repeated_dots_are_grouping() {
        assert_eq!(parse_revenue("3.600.000").unwrap(), dec!(3600000));
    }

    #[test]
    fn parse_revenue_single_dot_grouping() {
        assert_eq!(parse_revenue("R$ 360.000").unwrap(), dec!(360000));
        assert_eq!(parse_revenue("R$ 1.500").unwrap(), dec!(1500));
        assert_eq!(parse_revenue("1.500").unwrap(), dec!(1500));
        assert_eq!(parse_revenue("-1.500").unwrap(), dec!(-1500));
    }

    #[test]
    fn parse_revenue_single_dot_decimal() {
        assert_eq!(parse_revenue("1.50").unwrap(), dec!(1.50));
        assert_eq!(parse_revenue("1.5000").unwrap(), dec!(1.5000));
    }

    #[test]
    fn parse_revenue_empty_is_zero() {
        assert_eq!(parse_revenue("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_revenue("   ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_revenue("R$").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_revenue_negative() {
        assert_eq!(parse_revenue("-10,00").unwrap(), dec!(-10));
    }

    #[test]
    fn parse_revenue_rejects_garbage() {
        let err = parse_revenue("abc").unwrap_err();

        assert!(err.to_string().contains("invalid revenue 'abc'"));
    }

    #[test]
    fn batch_reads_labels_and_formats() {
        let csv = "label,rbt12\nCentro,200000.00\nFilial,\"R$ 1.000.000,00\"\n,500000\n";

        let records = RevenueBatch::parse(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].label.as_deref(), Some("Centro"));
        assert_eq!(records[1].rbt12, dec!(1000000.00));
        assert_eq!(records[2].label, None);
        assert_eq!(records[2].row, 3);
    }

    #[test]
    fn batch_label_column_is_optional() {
        let records = RevenueBatch::parse("rbt12\n100\n".as_bytes()).unwrap();

        assert_eq!(records[0].label, None);
        assert_eq!(records[0].rbt12, dec!(100));
    }

    #[test]
    fn batch_reports_row_of_bad_revenue() {
        let err = RevenueBatch::parse("rbt12\n100\nxyz\n".as_bytes()).unwrap_err();

        assert!(matches!(err, LoaderError::Revenue { row: 2, .. }));
    }

    #[test]
    fn batch_missing_rbt12_column_is_csv_error() {
        let err = RevenueBatch::parse("label\nCentro\n".as_bytes()).unwrap_err();

        assert!(matches!(err, LoaderError::Csv(_)));
    }
}
