use crate::contracts::types::{ActionEntry, BoundaryRow, ScoreCount, SegmentRow, SegmentSummary};
use crate::rfv::Segmentation;
use crate::rfv::quartile::MetricBoundaries;
use crate::rfv::score::ActionMap;
use crate::rfv::types::Metric;

pub(crate) fn boundary_rows(boundaries: &MetricBoundaries) -> Vec<BoundaryRow> {
    Metric::ALL
        .into_iter()
        .map(|metric| boundary_row(boundaries, metric))
        .collect()
}

pub(crate) fn boundary_row(boundaries: &MetricBoundaries, metric: Metric) -> BoundaryRow {
    let quartiles = boundaries.for_metric(metric);
    BoundaryRow {
        metric: metric.as_str().to_string(),
        polarity: metric.polarity().as_str().to_string(),
        p25: quartiles.p25,
        p50: quartiles.p50,
        p75: quartiles.p75,
    }
}

pub(crate) fn segment_rows(segmentation: &Segmentation) -> Vec<SegmentRow> {
    segmentation
        .customers
        .iter()
        .map(|customer| SegmentRow {
            customer_id: customer.metrics.customer_id.clone(),
            recency: customer.metrics.recency,
            frequency: customer.metrics.frequency,
            value: customer.metrics.value,
            r_quartile: customer.score.recency.as_char().to_string(),
            f_quartile: customer.score.frequency.as_char().to_string(),
            v_quartile: customer.score.value.as_char().to_string(),
            rfv_score: customer.score.to_string(),
            marketing_action: customer.action.clone(),
        })
        .collect()
}

pub(crate) fn score_counts(segmentation: &Segmentation, actions: &ActionMap) -> Vec<ScoreCount> {
    segmentation
        .score_counts()
        .into_iter()
        .map(|(score, customers)| ScoreCount {
            rfv_score: score.to_string(),
            customers: customers as i64,
            marketing_action: actions.lookup(&score).map(str::to_string),
        })
        .collect()
}

pub(crate) fn segment_summary(segmentation: &Segmentation) -> SegmentSummary {
    SegmentSummary {
        reference_date: format_iso_date(segmentation),
        customer_count: segmentation.customers.len() as i64,
        total_value: segmentation.total_value(),
    }
}

pub(crate) fn action_entries(actions: &ActionMap) -> Vec<ActionEntry> {
    actions
        .iter()
        .map(|(score, action)| ActionEntry {
            rfv_score: score.to_string(),
            marketing_action: action.to_string(),
        })
        .collect()
}

fn format_iso_date(segmentation: &Segmentation) -> String {
    segmentation.reference_date.format("%Y-%m-%d").to_string()
}
