//! Shared "load dashboard" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch CSVs + GeoJSON -> parse -> owned `Dashboard` value
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::Fetcher;
use crate::domain::{ChartKind, DashboardConfig, TimeSeries};
use crate::error::{AppError, LoadError, MetricError};
use crate::io::geojson::{DistrictMap, load_districts};
use crate::io::ingest::{IngestedSeries, load};
use crate::metrics::{RegionMetrics, occupancy_percent};

/// Everything loaded for one region.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub config: DashboardConfig,
    pub infected: IngestedSeries,
    pub deaths: IngestedSeries,
    pub hospitalised: IngestedSeries,
    pub districts: Option<DistrictMap>,
    /// Why the configured district map could not be used.
    ///
    /// The map is optional: a failed map load never fails the series.
    pub map_error: Option<LoadError>,
}

impl Dashboard {
    pub fn ingested(&self, kind: ChartKind) -> &IngestedSeries {
        match kind {
            ChartKind::Infected => &self.infected,
            ChartKind::Deaths => &self.deaths,
            ChartKind::Hospitalised => &self.hospitalised,
        }
    }

    pub fn series(&self, kind: ChartKind) -> &TimeSeries {
        &self.ingested(kind).series
    }

    /// Infection metrics, recomputed on every call.
    pub fn infection_metrics(&self) -> RegionMetrics {
        RegionMetrics::compute(&self.infected.series)
    }

    pub fn occupancy(&self) -> Result<i64, MetricError> {
        occupancy_percent(&self.hospitalised.series, self.config.bed_capacity)
    }
}

/// Load all series (and the optional map) for a region.
///
/// The loads are independent of each other and run in parallel.
pub fn load_dashboard(config: &DashboardConfig) -> Result<Dashboard, AppError> {
    let fetcher = Fetcher::new()?;

    let ((infected, deaths), (hospitalised, districts)) = rayon::join(
        || {
            rayon::join(
                || load(&fetcher, &config.infected),
                || load(&fetcher, &config.deaths),
            )
        },
        || {
            rayon::join(
                || load(&fetcher, &config.hospitalised),
                || config.map.as_ref().map(|src| load_districts(&fetcher, src)).transpose(),
            )
        },
    );

    let (districts, map_error) = match districts {
        Ok(districts) => (districts, None),
        Err(err) => {
            tracing::warn!(%err, "district map unavailable, continuing without it");
            (None, Some(err))
        }
    };

    Ok(Dashboard {
        config: config.clone(),
        infected: infected?,
        deaths: deaths?,
        hospitalised: hospitalised?,
        districts,
        map_error,
    })
}

/// Load a single series without the rest of the dashboard.
pub fn load_one(config: &DashboardConfig, kind: ChartKind) -> Result<IngestedSeries, LoadError> {
    let fetcher = Fetcher::new()?;
    load(&fetcher, config.source_for(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_BED_CAPACITY, Source};

    fn write_csv(dir: &std::path::Path, name: &str, values_newest_first: &[i64]) -> Source {
        let mut text = String::from("date,count\n");
        let n = values_newest_first.len();
        for (i, v) in values_newest_first.iter().enumerate() {
            text.push_str(&format!("2021-01-{:02},{v}\n", n - i));
        }
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        Source::Path(path)
    }

    fn config(dir: &std::path::Path) -> DashboardConfig {
        DashboardConfig {
            region: "Newcastle".to_string(),
            infected: write_csv(dir, "i.csv", &[110, 106, 105, 104, 103, 102, 101, 100]),
            deaths: write_csv(dir, "d.csv", &[3, 2, 1]),
            hospitalised: write_csv(dir, "h.csv", &[665, 600]),
            map: None,
            bed_capacity: DEFAULT_BED_CAPACITY,
            mapbox_token: None,
        }
    }

    #[test]
    fn loads_every_series_and_derives_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let dashboard = load_dashboard(&config(dir.path())).unwrap();

        assert_eq!(dashboard.series(ChartKind::Deaths).values(), vec![1, 2, 3]);
        let metrics = dashboard.infection_metrics();
        assert_eq!(metrics.latest, 110);
        assert!((metrics.weekly_delta.clone().unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(dashboard.occupancy(), Ok(50));
        assert!(dashboard.districts.is_none());
        assert!(dashboard.map_error.is_none());
    }

    #[test]
    fn broken_map_does_not_fail_the_series() {
        let dir = tempfile::tempdir().unwrap();
        let map_path = dir.path().join("map.geojson");
        std::fs::write(&map_path, r#"{"type":"Feature"}"#).unwrap();
        let mut cfg = config(dir.path());
        cfg.map = Some(Source::Path(map_path));

        let dashboard = load_dashboard(&cfg).unwrap();
        assert!(dashboard.districts.is_none());
        assert!(matches!(dashboard.map_error, Some(LoadError::Malformed { .. })));
        assert_eq!(dashboard.infection_metrics().latest, 110);
        assert_eq!(dashboard.occupancy(), Ok(50));
    }

    #[test]
    fn unreachable_map_url_does_not_fail_the_series() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        // Nothing listens on the discard port.
        cfg.map = Some(Source::resolve("http://127.0.0.1:9/data", "newcastle-map.geojson"));

        let dashboard = load_dashboard(&cfg).unwrap();
        assert!(dashboard.districts.is_none());
        assert!(matches!(dashboard.map_error, Some(LoadError::Fetch { .. })));
        assert_eq!(dashboard.series(ChartKind::Deaths).values(), vec![1, 2, 3]);
    }

    #[test]
    fn valid_map_is_loaded_alongside_the_series() {
        let dir = tempfile::tempdir().unwrap();
        let map_path = dir.path().join("map.geojson");
        std::fs::write(
            &map_path,
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"name":"Byker","cases":7200},"geometry":null}]}"#,
        )
        .unwrap();
        let mut cfg = config(dir.path());
        cfg.map = Some(Source::Path(map_path));

        let dashboard = load_dashboard(&cfg).unwrap();
        assert_eq!(dashboard.districts.map(|m| m.districts.len()), Some(1));
        assert!(dashboard.map_error.is_none());
    }

    #[test]
    fn missing_file_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.deaths = Source::Path(dir.path().join("missing.csv"));

        let err = load_dashboard(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
