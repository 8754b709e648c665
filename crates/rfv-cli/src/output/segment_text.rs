use std::io;

use serde::Deserialize;
use serde_json::Value;

use super::format::{Column, bar, key_value_rows, render_table_or_blocks, terminal_width};
use super::model_text::{BoundaryView, boundary_table, source_label};

pub const NO_ACTION_MARKER: &str = "(no mapped action)";

const BAR_WIDTH: usize = 24;

#[derive(Debug, Deserialize)]
struct SegmentView {
    ledger: LedgerView,
    summary: SummaryView,
    action_source: String,
    boundaries: Vec<BoundaryView>,
    rows: Vec<CustomerView>,
    score_counts: Vec<ScoreCountView>,
    export: Option<ExportView>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LedgerView {
    pub(super) source_kind: String,
    pub(super) source_ref: Option<String>,
    pub(super) rows_read: i64,
}

#[derive(Debug, Deserialize)]
struct SummaryView {
    reference_date: String,
    customer_count: i64,
    total_value: f64,
}

#[derive(Debug, Deserialize)]
struct CustomerView {
    customer_id: String,
    recency: i64,
    frequency: i64,
    value: f64,
    rfv_score: String,
    marketing_action: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreCountView {
    rfv_score: String,
    customers: i64,
    marketing_action: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportView {
    path: String,
    rows_written: i64,
}

pub fn render_segment(data: &Value, limit: Option<usize>) -> io::Result<String> {
    let view = SegmentView::deserialize(data).map_err(io::Error::other)?;
    let width = terminal_width();

    let mut lines = vec!["RFV segmentation".to_string(), String::new()];
    lines.extend(key_value_rows(&[
        ("Ledger:", source_label(&view.ledger)),
        ("Reference date:", view.summary.reference_date.clone()),
        ("Customers:", view.summary.customer_count.to_string()),
        ("Total value:", format!("{:.2}", view.summary.total_value)),
        ("Action table:", view.action_source.clone()),
    ]));

    lines.push(String::new());
    lines.push("Quartile boundaries:".to_string());
    lines.extend(boundary_table(&view.boundaries, width));

    lines.push(String::new());
    lines.push("Score distribution:".to_string());
    lines.extend(score_chart(&view.score_counts));

    let shown = limit.unwrap_or(view.rows.len()).min(view.rows.len());
    lines.push(String::new());
    if shown < view.rows.len() {
        lines.push(format!(
            "Customers (showing {shown} of {}):",
            view.rows.len()
        ));
    } else {
        lines.push("Customers:".to_string());
    }
    lines.extend(customer_table(&view.rows[..shown], width));

    if let Some(export) = &view.export {
        lines.push(String::new());
        lines.push(format!(
            "Wrote {} rows to {}",
            export.rows_written, export.path
        ));
    }

    Ok(lines.join("\n"))
}

fn score_chart(counts: &[ScoreCountView]) -> Vec<String> {
    let max = counts
        .iter()
        .map(|count| count.customers.max(0) as usize)
        .max()
        .unwrap_or(0);
    let count_width = max.to_string().len();

    counts
        .iter()
        .map(|count| {
            let customers = count.customers.max(0) as usize;
            let action = count
                .marketing_action
                .as_deref()
                .unwrap_or(NO_ACTION_MARKER);
            format!(
                "  {}  {:<BAR_WIDTH$}  {customers:>count_width$}  {action}",
                count.rfv_score,
                bar(customers, max, BAR_WIDTH),
            )
        })
        .collect()
}

fn customer_table(rows: &[CustomerView], width: usize) -> Vec<String> {
    let columns = [
        Column::left("Customer"),
        Column::right("Recency"),
        Column::right("Frequency"),
        Column::right("Value"),
        Column::left("Score"),
        Column::left("Marketing action"),
    ];
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                row.customer_id.clone(),
                row.recency.to_string(),
                row.frequency.to_string(),
                format!("{:.2}", row.value),
                row.rfv_score.clone(),
                row.marketing_action
                    .clone()
                    .unwrap_or_else(|| NO_ACTION_MARKER.to_string()),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    render_table_or_blocks(&columns, &cells, width, "Customer")
}
