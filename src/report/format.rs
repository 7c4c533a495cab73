//! Formatted terminal output for the regional dashboard.
//!
//! We keep formatting code in one place so:
//! - the metric code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::app::pipeline::Dashboard;
use crate::chart::ChartStyle;
use crate::domain::{ChartKind, TimeSeries};
use crate::error::MetricError;
use crate::io::geojson::DistrictMap;
use crate::io::ingest::IngestedSeries;
use crate::metrics::{RegionMetrics, occupancy_text};

/// Format the full dashboard summary.
pub fn format_dashboard(dashboard: &Dashboard) -> String {
    let region = &dashboard.config.region;
    let mut out = String::new();

    out.push_str(&format!("=== cvd - {region} COVID-19 dashboard ===\n"));

    for kind in ChartKind::ALL {
        let ingested = dashboard.ingested(kind);
        out.push_str(&format_series_line(kind, region, ingested));
    }

    out.push('\n');
    out.push_str(&format_risk(&dashboard.infection_metrics()));
    out.push_str(&format_occupancy(dashboard.occupancy(), dashboard.config.bed_capacity));

    if let Some(map) = &dashboard.districts {
        out.push('\n');
        out.push_str(&format_districts(map));
    } else if let Some(err) = &dashboard.map_error {
        out.push('\n');
        out.push_str(&format!("District map: unavailable ({err})\n"));
    }

    out
}

fn format_series_line(kind: ChartKind, region: &str, ingested: &IngestedSeries) -> String {
    let style = ChartStyle::for_kind(kind);
    let series = &ingested.series;
    let mut line = format!(
        "{:<48} {:<24} n={} [{}]",
        style.title(region),
        kind.caption(series.latest().value),
        series.len(),
        date_span(series),
    );
    if !ingested.row_errors.is_empty() {
        line.push_str(&format!(" (skipped {} rows)", ingested.row_errors.len()));
    }
    line.push('\n');
    line
}

fn date_span(series: &TimeSeries) -> String {
    format!("{} .. {}", series.points()[0].label, series.latest().label)
}

/// Risk block: weekly change and tier, or why it is unavailable.
pub fn format_risk(metrics: &RegionMetrics) -> String {
    match &metrics.weekly_delta {
        Ok(delta) => format!(
            "Weekly change in infections: {delta:+.2}% -> {}\n",
            crate::metrics::classify_risk(*delta).display_name()
        ),
        Err(e) => format!("Risk level: unavailable ({e})\n"),
    }
}

pub fn format_occupancy(occupancy: Result<i64, MetricError>, capacity: u32) -> String {
    match occupancy {
        Ok(pct) => format!("{} (capacity {capacity} beds)\n", occupancy_text(pct)),
        Err(e) => format!("Bed availability: unavailable ({e})\n"),
    }
}

/// District band legend with counts, plus the districts themselves.
pub fn format_districts(map: &DistrictMap) -> String {
    let mut out = String::new();
    out.push_str("Districts by cases:\n");
    for (band, count) in map.band_counts() {
        out.push_str(&format!("  {} {:<12} {count}\n", band.hex(), band.range_label()));
    }

    let mut sorted: Vec<_> = map.districts.iter().collect();
    sorted.sort_by(|a, b| b.cases.cmp(&a.cases).then_with(|| a.name.cmp(&b.name)));
    for d in sorted {
        out.push_str(&format!("  {:<32} {:>8} {}\n", d.name, d.cases, d.band.hex()));
    }
    if !map.skipped.is_empty() {
        out.push_str(&format!("  (skipped {} features without cases)\n", map.skipped.len()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesPoint;

    fn series(values: &[i64]) -> TimeSeries {
        TimeSeries::from_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| SeriesPoint {
                    label: format!("day-{i}"),
                    value,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn risk_line_reports_tier() {
        let m = RegionMetrics::compute(&series(&[100, 0, 0, 0, 0, 0, 0, 110]));
        assert_eq!(format_risk(&m), "Weekly change in infections: +10.00% -> High Risk\n");
    }

    #[test]
    fn short_series_is_reported_not_fatal() {
        let m = RegionMetrics::compute(&series(&[1, 2]));
        assert_eq!(
            format_risk(&m),
            "Risk level: unavailable (series has 2 points, 8 required)\n"
        );
    }

    #[test]
    fn failed_map_is_reported_under_the_indicators() {
        let ingested = |text: &str| crate::io::ingest::parse_series(text, "mem").unwrap();
        let dashboard = Dashboard {
            config: crate::domain::DashboardConfig {
                region: "Newcastle".to_string(),
                infected: crate::domain::Source::parse("i.csv"),
                deaths: crate::domain::Source::parse("d.csv"),
                hospitalised: crate::domain::Source::parse("h.csv"),
                map: Some(crate::domain::Source::parse("https://example.org/newcastle-map.geojson")),
                bed_capacity: 1331,
                mapbox_token: None,
            },
            infected: ingested("date,n\n2021-01-02,5\n2021-01-01,4\n"),
            deaths: ingested("date,n\n2021-01-01,1\n"),
            hospitalised: ingested("date,n\n2021-01-01,665\n"),
            districts: None,
            map_error: Some(crate::error::LoadError::Fetch {
                source_name: "https://example.org/newcastle-map.geojson".to_string(),
                reason: "request failed with status 404 Not Found".to_string(),
            }),
        };

        let text = format_dashboard(&dashboard);
        assert!(text.contains("Beds Occupied: 50% (capacity 1331 beds)"));
        assert!(text.ends_with(
            "District map: unavailable (failed to fetch 'https://example.org/newcastle-map.geojson': request failed with status 404 Not Found)\n"
        ));
    }

    #[test]
    fn occupancy_line() {
        assert_eq!(
            format_occupancy(Ok(50), 1331),
            "Beds Occupied: 50% (capacity 1331 beds)\n"
        );
        assert_eq!(
            format_occupancy(Err(MetricError::ZeroCapacity), 0),
            "Bed availability: unavailable (capacity must be greater than zero)\n"
        );
    }
}
