use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::LedgerIssue;

pub(crate) const SEGMENT_HELP_COMMAND: &str = "rfv segment --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_segment_help_data(self, data: Value) -> Self {
        self.with_data(merge_segment_help_data(data))
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `rfv {cmd} --help` for usage."),
            None => "Run `rfv --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn empty_dataset() -> Self {
        Self::new(
            "empty_dataset",
            "The ledger has no transactions, so there is no reference date to measure recency from.",
            vec![
                "Provide a ledger with at least one transaction row.".to_string(),
                "Check that the CSV has data rows below the header.".to_string(),
            ],
        )
        .with_segment_help_data(json!({}))
    }

    pub fn missing_field(issues: Vec<LedgerIssue>) -> Self {
        let rows_invalid = issues
            .iter()
            .map(|issue| issue.row)
            .collect::<std::collections::BTreeSet<i64>>()
            .len();
        Self::new(
            "missing_field",
            &format!(
                "Ledger failed validation: {rows_invalid} rows have missing or unparsable fields. No segmentation was computed."
            ),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun rfv segment <path>.".to_string(),
            ],
        )
        .with_segment_help_data(json!({
            "rows_invalid": rows_invalid,
            "issues": issues,
        }))
    }

    pub fn invalid_metric(metric: &str, supported: &[&str]) -> Self {
        Self::new(
            "invalid_metric",
            &format!("Unknown metric `{metric}`."),
            vec![format!("Use one of: {}.", supported.join(", "))],
        )
        .with_data(json!({
            "metric": metric,
            "supported_metrics": supported,
        }))
    }

    pub fn invalid_input_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_input_format",
            message,
            vec![
                "Provide a supported ledger format (CSV with headers or a JSON array).".to_string(),
                "Run `rfv segment --help` to confirm column requirements.".to_string(),
            ],
        )
        .with_segment_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["csv", "json_array"],
        }))
    }

    pub fn schema_mismatch(
        required_headers: Vec<String>,
        accepted_aliases: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "schema_mismatch",
            "CSV headers do not satisfy the ledger schema.",
            vec![
                "Include all required headers.".to_string(),
                "Do not include unknown headers.".to_string(),
                "Run `rfv segment --help` to review the ledger columns.".to_string(),
            ],
        )
        .with_segment_help_data(json!({
            "required_headers": required_headers,
            "accepted_aliases": accepted_aliases,
            "actual_headers": actual_headers,
        }))
    }

    pub fn invalid_action_map(source: &str, detail: &str) -> Self {
        Self::new(
            "invalid_action_map",
            &format!("Action table from {source} is invalid: {detail}"),
            vec![
                "Provide a JSON object mapping 3-letter scores (A-D) to action text.".to_string(),
                "Example: {\"AAA\": \"Send VIP coupons\"}".to_string(),
                "Run `rfv actions` to inspect the effective table.".to_string(),
            ],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn export_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "export_failed",
            &format!("Could not write results to `{location}`: {detail}"),
            vec![format!(
                "Check that the directory for `{location}` exists and is writable."
            )],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_segment_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(SEGMENT_HELP_COMMAND.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;
    use crate::contracts::types::LedgerIssue;

    fn issue(row: i64, field: &str) -> LedgerIssue {
        LedgerIssue {
            row,
            field: field.to_string(),
            code: "missing_required_field".to_string(),
            description: format!("{field} must be present and non-empty."),
            expected: Some("non-empty string".to_string()),
            received: Some(String::new()),
        }
    }

    #[test]
    fn missing_field_counts_distinct_rows() {
        let error = ClientError::missing_field(vec![
            issue(2, "amount"),
            issue(2, "purchase_date"),
            issue(5, "customer_id"),
        ]);
        assert_eq!(error.code, "missing_field");
        assert!(error.message.contains("2 rows"));
        assert!(error.data.is_some());
        if let Some(data) = error.data {
            assert_eq!(data["rows_invalid"], 2);
            assert_eq!(data["issues"].as_array().map(Vec::len), Some(3));
            assert_eq!(data["help_command"], "rfv segment --help");
        }
    }

    #[test]
    fn invalid_metric_lists_supported_names() {
        let error = ClientError::invalid_metric("monetary", &["recency", "frequency", "value"]);
        assert_eq!(error.code, "invalid_metric");
        assert!(error.recovery_steps[0].contains("recency, frequency, value"));
    }
}
