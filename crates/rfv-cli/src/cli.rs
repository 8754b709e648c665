use clap::{Parser, Subcommand};

pub fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("limit must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(_) => Err("limit must be a positive whole number".to_string()),
    }
}

/// Extended help shown after `rfv segment --help`.
pub const SEGMENT_AFTER_HELP: &str = "\
How segmentation works:
  Each customer is reduced to three metrics measured against the most recent
  purchase anywhere in the ledger:
    recency    days since the customer's last purchase (lower is better)
    frequency  number of purchases
    value      total amount spent
  Every metric is split at its 25/50/75% quartiles across all customers and
  graded A (best) to D (worst). The grades form a score such as `ABD`, and
  scores listed in the action table carry a marketing action.

Ledger input:
  <path> is a CSV file with a header row or a JSON file with one top-level
  array of objects. Use `-` or pipe stdin to read from standard input.

  Columns (any order):
    customer_id     non-empty text
    purchase_date   YYYY-MM-DD
    purchase_code   non-empty text
    amount          non-negative number

  Spreadsheet exports using ID_cliente, DiaCompra, CodigoCompra, ValorTotal
  are accepted as-is.

  CSV example:
  customer_id,purchase_date,purchase_code,amount
  C1,2024-01-01,P1,100.00
  C1,2024-01-10,P2,50.00
  C2,2024-01-10,P3,200.00

Action table:
  --actions <path> takes precedence over RFV_ACTIONS=<path>; otherwise the
  built-in reference table is used. Run `rfv actions` to inspect it.
  Scores missing from the table are shown with no mapped action.
";

#[derive(Debug, Parser)]
#[command(
    name = "rfv",
    version,
    about = "recency/frequency/value customer segmentation",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score every customer in a purchase ledger
    #[command(after_long_help = SEGMENT_AFTER_HELP)]
    Segment {
        /// Path to a CSV or JSON ledger (use `-` for stdin)
        path: Option<String>,
        /// JSON file mapping scores to marketing actions
        #[arg(long)]
        actions: Option<String>,
        /// Write the classified customer table to this CSV file
        #[arg(long)]
        output: Option<String>,
        /// Show at most this many customer rows in text output
        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show quartile boundaries for each metric
    Quartiles {
        /// Path to a CSV or JSON ledger (use `-` for stdin)
        path: Option<String>,
        /// Restrict output to one metric: recency, frequency, or value
        #[arg(long)]
        metric: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the effective score to marketing action table
    Actions {
        /// JSON file mapping scores to marketing actions
        #[arg(long)]
        actions: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Segment { .. } => "segment",
            Self::Quartiles { .. } => "quartiles",
            Self::Actions { .. } => "actions",
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
