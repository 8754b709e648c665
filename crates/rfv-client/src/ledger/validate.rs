use chrono::NaiveDate;

use crate::contracts::types::LedgerIssue;
use crate::ledger::parse::ParsedRow;
use crate::rfv::types::Transaction;
use crate::{ClientError, ClientResult};

const AMOUNT_EXPECTED: &str = "non-negative number (e.g. 42.15)";

/// Every row is checked before failing so a single error lists all issues.
pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<Vec<Transaction>> {
    let mut transactions = Vec::new();
    let mut issues = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let customer_id = validate_required_string(
            raw.row,
            "customer_id",
            raw.customer_id,
            &mut row_issues,
        );
        let purchase_date = validate_purchase_date(raw.row, raw.purchase_date, &mut row_issues);
        let purchase_code = validate_required_string(
            raw.row,
            "purchase_code",
            raw.purchase_code,
            &mut row_issues,
        );
        let amount = validate_amount(raw.row, raw.amount, &mut row_issues);

        if let (Some(customer_id), Some(purchase_date), Some(purchase_code), Some(amount)) =
            (customer_id, purchase_date, purchase_code, amount)
            && row_issues.is_empty()
        {
            transactions.push(Transaction {
                customer_id,
                purchase_date,
                purchase_code,
                amount,
            });
        } else {
            issues.extend(row_issues);
        }
    }

    if !issues.is_empty() {
        return Err(ClientError::missing_field(issues));
    }

    Ok(transactions)
}

fn validate_required_string(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<LedgerIssue>,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(missing_issue(row, field, "non-empty string"));
    }
    normalized
}

fn validate_purchase_date(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<LedgerIssue>,
) -> Option<NaiveDate> {
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing_issue(row, "purchase_date", "YYYY-MM-DD"));
        return None;
    };

    let parsed = if looks_like_iso_date(&candidate) {
        NaiveDate::parse_from_str(&candidate, "%Y-%m-%d").ok()
    } else {
        None
    };

    if parsed.is_none() {
        issues.push(LedgerIssue {
            row,
            field: "purchase_date".to_string(),
            code: "invalid_date".to_string(),
            description: format!(
                "purchase_date must be a real calendar date as YYYY-MM-DD; got \"{candidate}\""
            ),
            expected: Some("YYYY-MM-DD".to_string()),
            received: Some(candidate),
        });
    }
    parsed
}

fn validate_amount(row: i64, value: Option<String>, issues: &mut Vec<LedgerIssue>) -> Option<f64> {
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing_issue(row, "amount", AMOUNT_EXPECTED));
        return None;
    };

    let Some(amount) = candidate.parse::<f64>().ok().filter(|value| value.is_finite()) else {
        issues.push(amount_issue(
            row,
            "invalid_number",
            format!("amount must be numeric; got \"{candidate}\""),
            candidate,
        ));
        return None;
    };

    if amount < 0.0 {
        issues.push(amount_issue(
            row,
            "negative_amount",
            format!("amount must not be negative; got {candidate}"),
            candidate,
        ));
        return None;
    }

    Some(amount)
}

fn missing_issue(row: i64, field: &str, expected: &str) -> LedgerIssue {
    LedgerIssue {
        row,
        field: field.to_string(),
        code: "missing_required_field".to_string(),
        description: format!("{field} must be present and non-empty."),
        expected: Some(expected.to_string()),
        received: Some(String::new()),
    }
}

fn amount_issue(row: i64, code: &str, description: String, received: String) -> LedgerIssue {
    LedgerIssue {
        row,
        field: "amount".to_string(),
        code: code.to_string(),
        description,
        expected: Some(AMOUNT_EXPECTED.to_string()),
        received: Some(received),
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    [0usize, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|index| bytes[*index].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::validate_rows;
    use crate::ledger::parse::ParsedRow;

    fn row(
        row: i64,
        customer_id: Option<&str>,
        purchase_date: Option<&str>,
        purchase_code: Option<&str>,
        amount: Option<&str>,
    ) -> ParsedRow {
        ParsedRow {
            row,
            customer_id: customer_id.map(str::to_string),
            purchase_date: purchase_date.map(str::to_string),
            purchase_code: purchase_code.map(str::to_string),
            amount: amount.map(str::to_string),
        }
    }

    fn issue_codes(rows: Vec<ParsedRow>) -> Vec<(i64, String, String)> {
        let result = validate_rows(rows);
        assert!(result.is_err());
        let Err(error) = result else {
            return Vec::new();
        };
        assert_eq!(error.code, "missing_field");
        error
            .data
            .and_then(|data| data.get("issues").and_then(|value| value.as_array().cloned()))
            .unwrap_or_default()
            .iter()
            .map(|issue| {
                (
                    issue["row"].as_i64().unwrap_or(0),
                    issue["field"].as_str().unwrap_or("").to_string(),
                    issue["code"].as_str().unwrap_or("").to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn valid_rows_become_transactions() {
        let result = validate_rows(vec![row(
            1,
            Some(" C1 "),
            Some("2024-01-10"),
            Some("P1"),
            Some("12.50"),
        )]);
        assert!(result.is_ok());
        if let Ok(transactions) = result {
            assert_eq!(transactions[0].customer_id, "C1");
            assert_eq!(transactions[0].purchase_date.to_string(), "2024-01-10");
            assert_eq!(transactions[0].amount, 12.5);
        }
    }

    #[test]
    fn reports_every_issue_across_rows() {
        let codes = issue_codes(vec![
            row(1, Some("C1"), Some("2024-01-10"), Some("P1"), Some("1.00")),
            row(2, None, Some("2024-02-30"), Some("P2"), Some("abc")),
            row(3, Some("C3"), Some("10/01/2024"), Some(""), Some("-4")),
        ]);
        assert_eq!(
            codes,
            vec![
                (2, "customer_id".to_string(), "missing_required_field".to_string()),
                (2, "purchase_date".to_string(), "invalid_date".to_string()),
                (2, "amount".to_string(), "invalid_number".to_string()),
                (3, "purchase_date".to_string(), "invalid_date".to_string()),
                (3, "purchase_code".to_string(), "missing_required_field".to_string()),
                (3, "amount".to_string(), "negative_amount".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_non_finite_amounts() {
        let codes = issue_codes(vec![
            row(1, Some("C1"), Some("2024-01-10"), Some("P1"), Some("inf")),
            row(2, Some("C1"), Some("2024-01-10"), Some("P2"), Some("NaN")),
        ]);
        assert_eq!(codes.len(), 2);
        assert!(codes.iter().all(|(_, _, code)| code == "invalid_number"));
    }

    #[test]
    fn accepts_amounts_with_more_than_two_decimals() {
        let result = validate_rows(vec![
            row(1, Some("C1"), Some("2024-01-10"), Some("P1"), Some("10.125")),
            row(2, Some("C2"), Some("2024-01-10"), Some("P2"), Some("5e-3")),
        ]);
        assert!(result.is_ok());
        if let Ok(transactions) = result {
            assert_eq!(transactions[0].amount, 10.125);
            assert_eq!(transactions[1].amount, 0.005);
        }
    }
}
