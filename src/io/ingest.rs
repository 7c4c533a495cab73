//! CSV ingest for daily regional series.
//!
//! The published files are `<label>,<count>` rows behind a single header row,
//! newest row first. This module turns them into an oldest-first `TimeSeries`.
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No silent NaN**: a count that is not an integer never reaches the series
//! - **Deterministic behavior** (no hidden reordering beyond the reversal)

use csv::StringRecord;

use crate::data::Fetcher;
use crate::domain::{SeriesPoint, Source, TimeSeries};
use crate::error::LoadError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the series plus what happened to each row.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    pub series: TimeSeries,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Fetch a resource and parse it into a series.
pub fn load(fetcher: &Fetcher, source: &Source) -> Result<IngestedSeries, LoadError> {
    let text = fetcher.fetch_text(source)?;
    let ingested = parse_series(&text, &source.display())?;
    tracing::info!(
        source = %source.display(),
        rows = ingested.rows_used,
        skipped = ingested.row_errors.len(),
        "loaded series"
    );
    Ok(ingested)
}

/// Parse CSV text (header first, newest row first) into an oldest-first series.
pub fn parse_series(text: &str, source_name: &str) -> Result<IngestedSeries, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut newest_first = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts on the line after the header; lines are 1-based.
        let fallback_line = idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                rows_read += 1;
                row_errors.push(RowError {
                    line: fallback_line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }
        rows_read += 1;

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match parse_row(&record) {
            Ok(point) => newest_first.push(point),
            Err(message) => {
                tracing::warn!(source = source_name, line, %message, "skipping row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    let rows_used = newest_first.len();
    newest_first.reverse();

    let series = TimeSeries::from_points(newest_first).ok_or_else(|| LoadError::Empty {
        source_name: source_name.to_string(),
        rows_read,
    })?;

    Ok(IngestedSeries {
        series,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn parse_row(record: &StringRecord) -> Result<SeriesPoint, String> {
    let label = record
        .get(0)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing label".to_string())?;
    let raw = record
        .get(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing count for '{label}'"))?;
    let value = raw
        .parse::<i64>()
        .map_err(|_| format!("Invalid count '{raw}' for '{label}'"))?;

    Ok(SeriesPoint {
        label: label.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_rows_into_chronological_order() {
        let text = "date,newCases\n2021-01-03,30\n2021-01-02,20\n2021-01-01,10\n";
        let ingested = parse_series(text, "test").unwrap();

        assert_eq!(ingested.series.len(), 3);
        assert_eq!(ingested.rows_used, 3);
        assert_eq!(ingested.series.labels(), vec!["2021-01-01", "2021-01-02", "2021-01-03"]);
        assert_eq!(ingested.series.values(), vec![10, 20, 30]);
        assert_eq!(ingested.series.latest().value, 30);
    }

    #[test]
    fn skips_malformed_rows_and_reports_them() {
        let text = "date,count\n2021-01-04,40\n2021-01-03,abc\n2021-01-02\n2021-01-01,10\n";
        let ingested = parse_series(text, "test").unwrap();

        assert_eq!(ingested.series.values(), vec![10, 40]);
        assert_eq!(ingested.rows_read, 4);
        assert_eq!(ingested.rows_used, 2);
        assert_eq!(ingested.row_errors.len(), 2);
        assert_eq!(ingested.row_errors[0].line, 3);
        assert!(ingested.row_errors[0].message.contains("abc"));
        assert_eq!(ingested.row_errors[1].line, 4);
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let text = "date,count\r\n2021-01-02,2\r\n2021-01-01,1\r\n\r\n";
        let ingested = parse_series(text, "test").unwrap();
        assert_eq!(ingested.series.values(), vec![1, 2]);
        assert!(ingested.row_errors.is_empty());
    }

    #[test]
    fn header_only_is_an_error() {
        let err = parse_series("date,count\n", "empty.csv").unwrap_err();
        match err {
            LoadError::Empty { source_name, rows_read } => {
                assert_eq!(source_name, "empty.csv");
                assert_eq!(rows_read, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = "date,count,area\n2021-01-02,7,E08000021\n2021-01-01,5,E08000021\n";
        let ingested = parse_series(text, "test").unwrap();
        assert_eq!(ingested.series.values(), vec![5, 7]);
    }
}
