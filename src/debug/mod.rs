//! Debug bundle writer for inspecting loaded inputs and derived indicators.

use std::fmt::Write as _;
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::pipeline::Dashboard;
use crate::domain::{ChartKind, WEEK_DAYS};
use crate::error::AppError;
use crate::report::format_districts;

/// Write a markdown bundle under `dir` and return its path.
pub fn write_debug_bundle(dashboard: &Dashboard, dir: &Path) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let region = dashboard.config.region.to_lowercase().replace(' ', "-");
    let path = dir.join(format!("cvd_debug_{region}_{ts}.md"));

    let body = render_bundle(dashboard);
    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    file.write_all(body.as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write debug file: {e}")))?;

    tracing::info!(path = %path.display(), "wrote debug bundle");
    Ok(path)
}

fn render_bundle(dashboard: &Dashboard) -> String {
    let cfg = &dashboard.config;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# cvd debug bundle");
    let _ = writeln!(out, "- generated: {}", Local::now().to_rfc3339());
    let _ = writeln!(out, "- region: {}", cfg.region);
    let _ = writeln!(out, "- bed_capacity: {}", cfg.bed_capacity);
    let _ = writeln!(
        out,
        "- map: {}",
        cfg.map.as_ref().map(|m| m.display()).unwrap_or_else(|| "-".to_string())
    );

    for kind in ChartKind::ALL {
        let ingested = dashboard.ingested(kind);
        let _ = writeln!(out, "\n## {:?}", kind);
        let _ = writeln!(out, "- source: {}", cfg.source_for(kind).display());
        let _ = writeln!(
            out,
            "- rows: read={} used={} skipped={}",
            ingested.rows_read,
            ingested.rows_used,
            ingested.row_errors.len()
        );
        for err in &ingested.row_errors {
            let _ = writeln!(out, "  - line {}: {}", err.line, err.message);
        }

        let _ = writeln!(out, "\n| label | value |");
        let _ = writeln!(out, "| - | - |");
        let points = ingested.series.points();
        let start = points.len().saturating_sub(WEEK_DAYS + 1);
        for p in &points[start..] {
            let _ = writeln!(out, "| {} | {} |", p.label, p.value);
        }
    }

    let _ = writeln!(out, "\n## Indicators");
    let metrics = dashboard.infection_metrics();
    match &metrics.weekly_delta {
        Ok(delta) => {
            let _ = writeln!(out, "- weekly_delta: {delta:.4}%");
        }
        Err(e) => {
            let _ = writeln!(out, "- weekly_delta: unavailable ({e})");
        }
    }
    match dashboard.occupancy() {
        Ok(pct) => {
            let _ = writeln!(out, "- occupancy: {pct}%");
        }
        Err(e) => {
            let _ = writeln!(out, "- occupancy: unavailable ({e})");
        }
    }

    if let Some(err) = &dashboard.map_error {
        let _ = writeln!(out, "\n## Districts\n- unavailable ({err})");
    }
    if let Some(map) = &dashboard.districts {
        let _ = writeln!(out, "\n## Districts\n```");
        out.push_str(&format_districts(map));
        let _ = writeln!(out, "```");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_BED_CAPACITY, DashboardConfig, Source};
    use crate::io::ingest::parse_series;

    #[test]
    fn bundle_lists_sources_and_recent_points() {
        let series = |text: &str| parse_series(text, "mem").unwrap();
        let dashboard = Dashboard {
            config: DashboardConfig {
                region: "North Tyneside".to_string(),
                infected: Source::parse("i.csv"),
                deaths: Source::parse("d.csv"),
                hospitalised: Source::parse("h.csv"),
                map: None,
                bed_capacity: DEFAULT_BED_CAPACITY,
                mapbox_token: None,
            },
            infected: series("date,n\n2021-01-02,5\n2021-01-01,4\n"),
            deaths: series("date,n\n2021-01-02,1\nbad,row\n2021-01-01,0\n"),
            hospitalised: series("date,n\n2021-01-01,20\n"),
            districts: None,
            map_error: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = write_debug_bundle(&dashboard, dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("cvd_debug_north-tyneside_"));

        let body = std::fs::read_to_string(path).unwrap();
        assert!(body.contains("- source: d.csv"));
        assert!(body.contains("- rows: read=3 used=2 skipped=1"));
        assert!(body.contains("| 2021-01-02 | 5 |"));
        assert!(body.contains("- weekly_delta: unavailable"));
        assert!(body.contains("- occupancy: 2%"));
    }
}
