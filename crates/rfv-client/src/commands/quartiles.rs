use crate::ClientResult;
use crate::commands::common::{boundary_row, boundary_rows};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::QuartilesData;
use crate::ledger;
use crate::rfv::aggregate::aggregate;
use crate::rfv::quartile::MetricBoundaries;
use crate::rfv::types::Metric;

#[derive(Debug, Default)]
pub struct QuartilesRunOptions {
    pub path: Option<String>,
    pub metric: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<&str>, metric: Option<&str>) -> ClientResult<SuccessEnvelope> {
    run_with_options(QuartilesRunOptions {
        path: path.map(std::string::ToString::to_string),
        metric: metric.map(std::string::ToString::to_string),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: QuartilesRunOptions) -> ClientResult<SuccessEnvelope> {
    let metric = options.metric.as_deref().map(Metric::from_name).transpose()?;

    let loaded = ledger::load(options.path, options.stdin_override)?;
    let aggregation = aggregate(&loaded.transactions)?;
    let boundaries = MetricBoundaries::compute(&aggregation.customers)?;

    let rows = match metric {
        Some(metric) => vec![boundary_row(&boundaries, metric)],
        None => boundary_rows(&boundaries),
    };

    let data = QuartilesData {
        ledger: loaded.summary,
        reference_date: aggregation.reference_date.format("%Y-%m-%d").to_string(),
        customer_count: aggregation.customers.len() as i64,
        boundaries: rows,
    };

    success("quartiles", data)
}
