use rfv_client::ClientError;
use serde_json::Value;

const MAX_LISTED_ISSUES: usize = 10;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = ledger_issues(error);
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Ledger issues:".to_string());
        for issue in issues.iter().take(MAX_LISTED_ISSUES) {
            lines.push(format!(
                "  row {}  {}  {}",
                issue["row"].as_i64().unwrap_or(0),
                issue["field"].as_str().unwrap_or(""),
                issue["description"].as_str().unwrap_or("")
            ));
        }
        if issues.len() > MAX_LISTED_ISSUES {
            lines.push(format!(
                "  ... and {} more (rerun with --json for the full list)",
                issues.len() - MAX_LISTED_ISSUES
            ));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn ledger_issues(error: &ClientError) -> Vec<Value> {
    error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
