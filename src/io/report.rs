//! JSON export of fit reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::engine::output::FitReport;
use crate::primitives::errors::SegfitError;

/// Write `report` as pretty-printed JSON to `path`.
pub fn write_json<T: Serialize, P: AsRef<Path>>(
    path: P,
    report: &FitReport<T>,
) -> Result<(), SegfitError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SegfitError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|e| SegfitError::ReportFailed(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| SegfitError::ReportFailed(e.to_string()))
}
