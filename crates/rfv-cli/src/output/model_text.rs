use std::io;

use serde::Deserialize;
use serde_json::Value;

use super::format::{Column, key_value_rows, render_table_or_blocks, terminal_width};
use super::segment_text::LedgerView;

#[derive(Debug, Deserialize)]
pub(super) struct BoundaryView {
    metric: String,
    polarity: String,
    p25: f64,
    p50: f64,
    p75: f64,
}

#[derive(Debug, Deserialize)]
struct QuartilesView {
    ledger: LedgerView,
    reference_date: String,
    customer_count: i64,
    boundaries: Vec<BoundaryView>,
}

#[derive(Debug, Deserialize)]
struct ActionsView {
    source: String,
    source_ref: Option<String>,
    entries: Vec<ActionEntryView>,
}

#[derive(Debug, Deserialize)]
struct ActionEntryView {
    rfv_score: String,
    marketing_action: String,
}

pub fn render_quartiles(data: &Value) -> io::Result<String> {
    let view = QuartilesView::deserialize(data).map_err(io::Error::other)?;

    let mut lines = vec!["Quartile boundaries".to_string(), String::new()];
    lines.extend(key_value_rows(&[
        ("Ledger:", source_label(&view.ledger)),
        ("Reference date:", view.reference_date.clone()),
        ("Customers:", view.customer_count.to_string()),
    ]));
    lines.push(String::new());
    lines.extend(boundary_table(&view.boundaries, terminal_width()));
    lines.push(String::new());
    lines.push(
        "Values at or below a boundary fall in that bucket: A is best for recency, D for the others."
            .to_string(),
    );
    Ok(lines.join("\n"))
}

pub fn render_actions(data: &Value) -> io::Result<String> {
    let view = ActionsView::deserialize(data).map_err(io::Error::other)?;

    let source = match &view.source_ref {
        Some(path) => format!("{} ({path})", view.source),
        None => view.source.clone(),
    };
    let mut lines = vec!["Marketing action table".to_string(), String::new()];
    lines.extend(key_value_rows(&[
        ("Source:", source),
        ("Entries:", view.entries.len().to_string()),
    ]));
    lines.push(String::new());

    if view.entries.is_empty() {
        lines.push(
            "  No scores are mapped; every customer will show no mapped action.".to_string(),
        );
        return Ok(lines.join("\n"));
    }

    let columns = [Column::left("Score"), Column::left("Marketing action")];
    let rows = view
        .entries
        .iter()
        .map(|entry| vec![entry.rfv_score.clone(), entry.marketing_action.clone()])
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table_or_blocks(&columns, &rows, terminal_width(), "Entry"));
    Ok(lines.join("\n"))
}

pub(super) fn boundary_table(boundaries: &[BoundaryView], width: usize) -> Vec<String> {
    let columns = [
        Column::left("Metric"),
        Column::left("Better when"),
        Column::right("25%"),
        Column::right("50%"),
        Column::right("75%"),
    ];
    let rows = boundaries
        .iter()
        .map(|boundary| {
            let direction = if boundary.polarity == "lower_is_better" {
                "lower"
            } else {
                "higher"
            };
            vec![
                boundary.metric.clone(),
                direction.to_string(),
                format!("{:.2}", boundary.p25),
                format!("{:.2}", boundary.p50),
                format!("{:.2}", boundary.p75),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table_or_blocks(&columns, &rows, width, "Metric")
}

pub(super) fn source_label(ledger: &LedgerView) -> String {
    let origin = ledger.source_ref.as_deref().unwrap_or("stdin");
    format!(
        "{origin} ({}, {} rows)",
        ledger.source_kind, ledger.rows_read
    )
}
