//! Text and CSV renderings of worksheet results and bracket tables.

use std::fmt;
use std::io::Write;

use serde::Serialize;
use simples_core::display::{format_brl, format_percent};
use simples_core::{Aliq1Bracket, Aliq2Bracket, BracketTable, PgdasResult};

/// Human-readable worksheet, one value per line.
pub struct WorksheetReport<'a>(pub &'a PgdasResult);

impl fmt::Display for WorksheetReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.0;
        writeln!(f, "RBT12:              R$ {}", format_brl(r.revenue, 2))?;
        writeln!(
            f,
            "ALIQ1 (faixa {}):    {}%",
            r.aliq1_faixa,
            r.aliq1_full_pct.normalize()
        )?;
        writeln!(f, "ALIQ1 arredondada:  {}%", format_percent(r.aliq1_rounded_pct))?;
        writeln!(
            f,
            "ALIQ2 (faixa {}, {}): {}%",
            r.aliq2_faixa,
            r.aliq2_label,
            format_percent(r.aliq2_pct)
        )?;
        writeln!(
            f,
            "PR = (({} - {}) * 100) / {}",
            r.aliq1_full_pct.normalize(),
            format_percent(r.aliq2_pct),
            format_percent(r.aliq1_rounded_pct)
        )?;
        write!(f, "PR:                 {}%", r.pr_display())
    }
}

/// One line of the batch CSV report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub label: String,
    pub rbt12: String,
    pub aliq1_faixa: usize,
    pub aliq1_full_pct: String,
    pub aliq1_rounded_pct: String,
    pub aliq2_faixa: usize,
    pub aliq2_pct: String,
    pub pr: String,
    pub valid: bool,
}

impl BatchRow {
    pub fn new(
        row: usize,
        label: Option<&str>,
        result: &PgdasResult,
    ) -> Self {
        Self {
            row,
            label: label.unwrap_or_default().to_string(),
            rbt12: result.revenue.to_string(),
            aliq1_faixa: result.aliq1_faixa,
            aliq1_full_pct: result.aliq1_full_pct.normalize().to_string(),
            aliq1_rounded_pct: format_percent(result.aliq1_rounded_pct),
            aliq2_faixa: result.aliq2_faixa,
            aliq2_pct: format_percent(result.aliq2_pct),
            pr: result.pr_display(),
            valid: result.revenue_is_valid(),
        }
    }
}

/// Writes `rows` as CSV with a header line.
pub fn write_batch_csv<W: Write>(
    writer: W,
    rows: &[BatchRow],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders both tables as aligned text.
pub fn write_tables<W: Write>(
    out: &mut W,
    aliq1: &BracketTable<Aliq1Bracket>,
    aliq2: &BracketTable<Aliq2Bracket>,
) -> std::io::Result<()> {
    writeln!(out, "ALIQ1")?;
    writeln!(
        out,
        "{:>5}  {:>16}  {:>8}  {:>12}  {:>10}",
        "faixa", "até (R$)", "nominal", "PED (R$)", "repartição"
    )?;
    for (i, b) in aliq1.iter().enumerate() {
        writeln!(
            out,
            "{:>5}  {:>16}  {:>8}  {:>12}  {:>10}",
            i + 1,
            format_brl(b.upper_limit, 2),
            b.nominal_rate.normalize(),
            format_brl(b.deduction, 2),
            b.apportionment.normalize()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "ALIQ2")?;
    writeln!(out, "{:>5}  {:>16}  {:>8}", "faixa", "até (R$)", "aliq2 %")?;
    for (i, b) in aliq2.iter().enumerate() {
        writeln!(
            out,
            "{:>5}  {:>16}  {:>8}",
            i + 1,
            format_brl(b.upper_limit, 2),
            format_percent(b.aliq2_pct)
        )?;
    }
    Ok(())
}
