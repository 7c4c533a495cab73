//! Exports: series back to CSV, chart payloads to JSON.
//!
//! The CSV export uses the same layout the loader expects (header first,
//! newest row first) so an exported file can be fed straight back in.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::chart::ChartSpec;
use crate::domain::TimeSeries;
use crate::error::AppError;

/// Serialize a series in the published layout (header, newest row first).
pub fn write_series_csv<W: Write>(writer: W, series: &TimeSeries, value_column: &str) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(["date", value_column])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in series.points().iter().rev() {
        let value = p.value.to_string();
        out.write_record([p.label.as_str(), value.as_str()])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write a series to a CSV file.
pub fn write_series_csv_file(path: &Path, series: &TimeSeries, value_column: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_series_csv(file, series, value_column)
}

/// Write a chart payload as pretty JSON.
pub fn write_chart_json(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, spec)
        .map_err(|e| AppError::new(2, format!("Failed to write chart JSON: {e}")))?;

    Ok(())
}
