use std::path::Path;

use crate::ClientResult;
use crate::actions;
use crate::commands::common::{boundary_rows, score_counts, segment_rows, segment_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SegmentData;
use crate::export::write_segment_csv;
use crate::ledger;
use crate::rfv::compute_rfv;

#[derive(Debug, Default)]
pub struct SegmentRunOptions {
    pub path: Option<String>,
    pub actions_path: Option<String>,
    pub output_path: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(
    path: Option<&str>,
    actions_path: Option<&str>,
    output_path: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(SegmentRunOptions {
        path: path.map(std::string::ToString::to_string),
        actions_path: actions_path.map(std::string::ToString::to_string),
        output_path: output_path.map(std::string::ToString::to_string),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SegmentRunOptions) -> ClientResult<SuccessEnvelope> {
    let resolved_actions = actions::resolve(options.actions_path.as_deref())?;
    let loaded = ledger::load(options.path, options.stdin_override)?;
    let segmentation = compute_rfv(&loaded.transactions, &resolved_actions.map)?;

    let rows = segment_rows(&segmentation);
    let export = match options.output_path.as_deref() {
        Some(output) => Some(write_segment_csv(Path::new(output), &rows)?),
        None => None,
    };

    let data = SegmentData {
        ledger: loaded.summary,
        summary: segment_summary(&segmentation),
        action_source: resolved_actions.source.as_str().to_string(),
        boundaries: boundary_rows(&segmentation.boundaries),
        score_counts: score_counts(&segmentation, &resolved_actions.map),
        rows,
        export,
    };

    success("segment", data)
}
