use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use simples_cli::app::{self, TableSet};
use simples_cli::config::Config;
use simples_cli::logging::init_logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Simples Nacional calculator: ALIQ1, ALIQ2 and the reduction percentage
/// (PR) from the trailing-twelve-month revenue (RBT12).
#[derive(Debug, Parser)]
#[command(name = "simples", version, about, long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to `simples.toml` when present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CSV file replacing the built-in ALIQ1 table.
    #[arg(long, global = true)]
    aliq1_table: Option<PathBuf>,

    /// CSV file replacing the built-in ALIQ2 table.
    #[arg(long, global = true)]
    aliq2_table: Option<PathBuf>,

    /// Log level or EnvFilter directive (`RUST_LOG` still wins).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the worksheet for one RBT12 value.
    Calc {
        /// RBT12, e.g. `200000.00` or `"R$ 200.000,00"`.
        #[arg(allow_hyphen_values = true)]
        rbt12: String,
    },

    /// Calculate every row of a CSV file with an `rbt12` column.
    Batch {
        /// Input CSV (`rbt12` and optional `label` columns).
        input: PathBuf,

        /// Output CSV; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the bracket tables in use.
    Tables,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    fn apply_overrides(
        &self,
        config: &mut Config,
    ) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if let Some(path) = &self.aliq1_table {
            config.tables.aliq1 = Some(path.clone());
        }
        if let Some(path) = &self.aliq2_table {
            config.tables.aliq2 = Some(path.clone());
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    init_logging(&config.logging.level, config.logging.file.as_deref())?;
    debug!(?config, "configuration resolved");

    let tables = TableSet::load(&config.tables)?;

    match &cli.command {
        Command::Calc { rbt12 } => {
            let mut stdout = io::stdout().lock();
            app::run_calc(&tables, rbt12, &mut stdout)?;
        }
        Command::Batch { input, output } => {
            let reader = File::open(input)
                .with_context(|| format!("Failed to open: {}", input.display()))?;
            match output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create: {}", path.display()))?;
                    app::run_batch(&tables, reader, BufWriter::new(file))?;
                }
                None => {
                    app::run_batch(&tables, reader, io::stdout().lock())?;
                }
            }
        }
        Command::Tables => {
            let mut stdout = io::stdout().lock();
            app::run_tables(&tables, &mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
