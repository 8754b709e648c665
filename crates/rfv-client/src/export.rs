use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::contracts::types::{ExportSummary, SegmentRow};
use crate::{ClientError, ClientResult};

/// Writes one CSV row per classified customer, header included. Unmapped
/// scores leave `marketing_action` empty.
pub fn write_segment_csv(path: &Path, rows: &[SegmentRow]) -> ClientResult<ExportSummary> {
    let file =
        File::create(path).map_err(|error| ClientError::export_failed(path, &error.to_string()))?;
    write_segment_rows(file, rows)
        .map_err(|error| ClientError::export_failed(path, &error.to_string()))?;

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        "export.csv_written"
    );
    Ok(ExportSummary {
        path: path.display().to_string(),
        rows_written: rows.len() as i64,
    })
}

pub fn write_segment_rows<W: Write>(writer: W, rows: &[SegmentRow]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
