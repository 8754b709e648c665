//! Loads a purchase ledger from CSV or a JSON array into typed transactions.

pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use crate::contracts::types::LedgerSummary;
use crate::rfv::types::Transaction;
use crate::{ClientError, ClientResult};

pub(crate) const LEDGER_FIELDS: [&str; 4] =
    ["customer_id", "purchase_date", "purchase_code", "amount"];

/// Column names used by the original spreadsheet exports, accepted as-is.
pub(crate) const LEDGER_FIELD_ALIASES: [(&str, &str); 4] = [
    ("ID_cliente", "customer_id"),
    ("DiaCompra", "purchase_date"),
    ("CodigoCompra", "purchase_code"),
    ("ValorTotal", "amount"),
];

#[derive(Debug, Clone)]
pub struct LoadedLedger {
    pub transactions: Vec<Transaction>,
    pub summary: LedgerSummary,
}

pub(crate) fn canonical_field_name(header: &str) -> Option<&'static str> {
    if let Some(field) = LEDGER_FIELDS.iter().find(|field| **field == header) {
        return Some(field);
    }
    LEDGER_FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == header)
        .map(|(_, field)| *field)
}

pub fn load(path: Option<String>, stdin_override: Option<String>) -> ClientResult<LoadedLedger> {
    let source = input::resolve_source(path, stdin_override)?;
    let parsed_rows = parse::parse_source(&source.content)?;
    let rows_read = parsed_rows.len() as i64;
    if parsed_rows.is_empty() {
        return Err(ClientError::empty_dataset());
    }

    let transactions = validate::validate_rows(parsed_rows)?;
    tracing::debug!(
        source = source.source_kind.as_str(),
        rows = rows_read,
        "ledger.loaded"
    );

    Ok(LoadedLedger {
        transactions,
        summary: LedgerSummary {
            source_kind: source.source_kind.as_str().to_string(),
            source_ref: source.source_ref,
            rows_read,
        },
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Pass a ledger file path, or `-` to read piped stdin.".to_string(),
            "Run `rfv segment --help` to review the ledger columns.".to_string(),
        ],
    )
}
