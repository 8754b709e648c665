use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::ledger::{
    LEDGER_FIELD_ALIASES, LEDGER_FIELDS, canonical_field_name, invalid_input_error,
};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) customer_id: Option<String>,
    pub(crate) purchase_date: Option<String>,
    pub(crate) purchase_code: Option<String>,
    pub(crate) amount: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_input_format(
            "NDJSON is not supported. Provide CSV with headers or a JSON array.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_input_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    Err(ClientError::invalid_input_format(
        "Unsupported ledger format. Provide CSV with headers or a JSON array.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        rows.push(ParsedRow {
            row: (index as i64) + 1,
            customer_id: json_field(object, "customer_id"),
            purchase_date: json_field(object, "purchase_date"),
            purchase_code: json_field(object, "purchase_code"),
            amount: json_field(object, "amount"),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<String>>();

    let Some(index_by_field) = index_headers(&headers) else {
        return Err(ClientError::schema_mismatch(
            LEDGER_FIELDS.iter().map(|value| value.to_string()).collect(),
            LEDGER_FIELD_ALIASES
                .iter()
                .map(|(alias, _)| alias.to_string())
                .collect(),
            headers,
        ));
    };

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            customer_id: value_for(&record, &index_by_field, "customer_id"),
            purchase_date: value_for(&record, &index_by_field, "purchase_date"),
            purchase_code: value_for(&record, &index_by_field, "purchase_code"),
            amount: value_for(&record, &index_by_field, "amount"),
        });
    }

    Ok(rows)
}

/// Maps each canonical field to its column. `None` when a required field is
/// missing or a header is neither a field nor a known alias.
fn index_headers(headers: &[String]) -> Option<HashMap<&'static str, usize>> {
    let mut index_by_field = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        let field = canonical_field_name(header)?;
        index_by_field.insert(field, index);
    }

    if LEDGER_FIELDS
        .iter()
        .all(|field| index_by_field.contains_key(field))
    {
        return Some(index_by_field);
    }
    None
}

fn value_for(
    record: &csv::StringRecord,
    index_by_field: &HashMap<&'static str, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_field.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn json_field(object: &Map<String, Value>, field_name: &str) -> Option<String> {
    let direct = object.get(field_name);
    let aliased = || {
        LEDGER_FIELD_ALIASES
            .iter()
            .filter(|(_, field)| *field == field_name)
            .find_map(|(alias, _)| object.get(*alias))
    };
    read_optional_string(direct.or_else(aliased))
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    if let Some(number_value) = current.as_number() {
        return Some(number_value.to_string());
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        let parsed = serde_json::from_str::<Value>(line.trim());
        if let Ok(value) = parsed {
            return value.is_object();
        }
        false
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

#[cfg(test)]
mod tests {
    use super::parse_source;

    #[test]
    fn csv_with_original_column_names_is_accepted() {
        let parsed = parse_source(
            "ID_cliente,DiaCompra,CodigoCompra,ValorTotal\n1617,2021-12-11,1,1.00\n",
        );
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].customer_id.as_deref(), Some("1617"));
            assert_eq!(rows[0].purchase_date.as_deref(), Some("2021-12-11"));
            assert_eq!(rows[0].amount.as_deref(), Some("1.00"));
        }
    }

    #[test]
    fn csv_columns_may_appear_in_any_order() {
        let parsed =
            parse_source("amount,customer_id,purchase_code,purchase_date\n9.5,C7,P1,2024-02-02\n");
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows[0].customer_id.as_deref(), Some("C7"));
            assert_eq!(rows[0].amount.as_deref(), Some("9.5"));
        }
    }

    #[test]
    fn csv_with_unknown_or_missing_headers_is_a_schema_mismatch() {
        let unknown = parse_source(
            "customer_id,purchase_date,purchase_code,amount,store\nC1,2024-01-01,P1,1,X\n",
        );
        assert!(unknown.is_err());
        if let Err(error) = unknown {
            assert_eq!(error.code, "schema_mismatch");
        }

        let missing = parse_source("customer_id,purchase_date,amount\nC1,2024-01-01,1\n");
        assert!(missing.is_err());
        if let Err(error) = missing {
            assert_eq!(error.code, "schema_mismatch");
        }
    }

    #[test]
    fn json_numbers_are_read_as_text() {
        let parsed = parse_source(
            r#"[{"customer_id": 17850, "purchase_date": "2024-01-01", "purchase_code": "P1", "amount": 42.15}]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows[0].customer_id.as_deref(), Some("17850"));
            assert_eq!(rows[0].amount.as_deref(), Some("42.15"));
        }
    }

    #[test]
    fn json_accepts_original_field_names() {
        let parsed = parse_source(
            r#"[{"ID_cliente": "C1", "DiaCompra": "2024-01-01", "CodigoCompra": 9, "ValorTotal": null}]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows[0].customer_id.as_deref(), Some("C1"));
            assert_eq!(rows[0].purchase_code.as_deref(), Some("9"));
            assert!(rows[0].amount.is_none());
        }
    }

    #[test]
    fn ndjson_and_non_array_json_are_rejected() {
        let ndjson = parse_source("{\"customer_id\":\"a\"}\n{\"customer_id\":\"b\"}\n");
        assert!(ndjson.is_err());
        if let Err(error) = ndjson {
            assert_eq!(error.code, "invalid_input_format");
        }

        let object = parse_source("{\"customer_id\":\"a\"}");
        assert!(object.is_err());
        if let Err(error) = object {
            assert_eq!(error.code, "invalid_input_format");
        }
    }

    #[test]
    fn blank_source_has_no_rows() {
        let parsed = parse_source("  \n ");
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert!(rows.is_empty());
        }
    }
}
