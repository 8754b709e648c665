use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LedgerIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    pub expected: Option<String>,
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub source_kind: String,
    pub source_ref: Option<String>,
    pub rows_read: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentSummary {
    pub reference_date: String,
    pub customer_count: i64,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundaryRow {
    pub metric: String,
    pub polarity: String,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentRow {
    pub customer_id: String,
    pub recency: i64,
    pub frequency: i64,
    pub value: f64,
    pub r_quartile: String,
    pub f_quartile: String,
    pub v_quartile: String,
    pub rfv_score: String,
    pub marketing_action: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCount {
    pub rfv_score: String,
    pub customers: i64,
    pub marketing_action: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: String,
    pub rows_written: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentData {
    pub ledger: LedgerSummary,
    pub summary: SegmentSummary,
    pub action_source: String,
    pub boundaries: Vec<BoundaryRow>,
    pub rows: Vec<SegmentRow>,
    pub score_counts: Vec<ScoreCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuartilesData {
    pub ledger: LedgerSummary,
    pub reference_date: String,
    pub customer_count: i64,
    pub boundaries: Vec<BoundaryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionEntry {
    pub rfv_score: String,
    pub marketing_action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionsData {
    pub source: String,
    pub source_ref: Option<String>,
    pub entries: Vec<ActionEntry>,
}
