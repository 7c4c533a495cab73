//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while rendering the dashboard
//! - exported to JSON/CSV for chart and map front-ends
//! - reloaded later for comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One observation of a daily metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Row label as it appeared in the source (usually a date string).
    pub label: String,
    pub value: i64,
}

/// An ordered, non-empty daily series in chronological (oldest-first) order.
///
/// Built once from a fetched resource and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Build a series from oldest-first points. Returns `None` when empty.
    pub fn from_points(points: Vec<SeriesPoint>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation.
    pub fn latest(&self) -> &SeriesPoint {
        // Non-empty by construction.
        &self.points[self.points.len() - 1]
    }

    /// Observation `offset` entries before the latest one, if present.
    pub fn back(&self, offset: usize) -> Option<&SeriesPoint> {
        let idx = self.points.len().checked_sub(offset + 1)?;
        self.points.get(idx)
    }

    /// Parallel x-axis labels for chart front-ends.
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    /// Parallel y-axis values for chart front-ends.
    pub fn values(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn max_value(&self) -> i64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

/// The three regional charts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Infected,
    Deaths,
    Hospitalised,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Infected, ChartKind::Deaths, ChartKind::Hospitalised];

    /// File-name suffix used for the default data files (`<region>-<suffix>.csv`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            ChartKind::Infected => "infected",
            ChartKind::Deaths => "deaths",
            ChartKind::Hospitalised => "hospitalised",
        }
    }

    /// Caption shown under the chart with the latest value.
    pub fn caption(self, latest: i64) -> String {
        match self {
            ChartKind::Infected => format!("Current Infected: {latest}"),
            ChartKind::Deaths => format!("Current Dead: {latest}"),
            ChartKind::Hospitalised => format!("Current Occupancy: {latest}"),
        }
    }
}

/// Risk tier derived from the weekly change in infections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

/// Case-count band used to colour districts on the map.
///
/// Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaseBand {
    Severe,
    High,
    Elevated,
    Baseline,
}

impl CaseBand {
    pub const ALL: [CaseBand; 4] = [CaseBand::Severe, CaseBand::High, CaseBand::Elevated, CaseBand::Baseline];

    /// Fill colour token handed to the map front-end.
    pub fn hex(self) -> &'static str {
        match self {
            CaseBand::Severe => "#BD0026",
            CaseBand::High => "#FC4E2A",
            CaseBand::Elevated => "#FEB24C",
            CaseBand::Baseline => "#FFEDA0",
        }
    }

    /// RGB triple of `hex()` for terminal rendering.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            CaseBand::Severe => (0xBD, 0x00, 0x26),
            CaseBand::High => (0xFC, 0x4E, 0x2A),
            CaseBand::Elevated => (0xFE, 0xB2, 0x4C),
            CaseBand::Baseline => (0xFF, 0xED, 0xA0),
        }
    }

    /// Legend text for the band.
    pub fn range_label(self) -> &'static str {
        match self {
            CaseBand::Severe => "> 7000",
            CaseBand::High => "5001 - 7000",
            CaseBand::Elevated => "3001 - 5000",
            CaseBand::Baseline => "<= 3000",
        }
    }
}

/// Government restriction tiers with their own guidance section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierStatus {
    Tier1,
    Tier2,
    Tier3,
    NationalLockdown,
}

impl TierStatus {
    pub const ALL: [TierStatus; 4] = [
        TierStatus::Tier1,
        TierStatus::Tier2,
        TierStatus::Tier3,
        TierStatus::NationalLockdown,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            TierStatus::Tier1 => "Tier 1",
            TierStatus::Tier2 => "Tier 2",
            TierStatus::Tier3 => "Tier 3",
            TierStatus::NationalLockdown => "National Lockdown",
        }
    }

    /// Exact-match lookup by menu label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == label)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Where a resource lives: a remote URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are fetched; everything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else {
            Source::Path(PathBuf::from(trimmed))
        }
    }

    /// Resolve a location relative to a data directory (URLs are kept as-is).
    pub fn resolve(base: &str, name: &str) -> Self {
        match Source::parse(base) {
            Source::Url(url) => Source::Url(format!("{}/{name}", url.trim_end_matches('/'))),
            Source::Path(dir) => Source::Path(dir.join(name)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Source::Url(url) => url.clone(),
            Source::Path(path) => path.display().to_string(),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, environment and defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Region name used in chart titles (e.g. "Newcastle").
    pub region: String,
    pub infected: Source,
    pub deaths: Source,
    pub hospitalised: Source,
    /// Optional GeoJSON district map.
    pub map: Option<Source>,
    /// Fixed bed count used for the occupancy percentage.
    pub bed_capacity: u32,
    /// Mapbox token for the tile layer description (never logged).
    pub mapbox_token: Option<String>,
}

impl DashboardConfig {
    pub fn source_for(&self, kind: ChartKind) -> &Source {
        match kind {
            ChartKind::Infected => &self.infected,
            ChartKind::Deaths => &self.deaths,
            ChartKind::Hospitalised => &self.hospitalised,
        }
    }
}

/// Default bed capacity for the region's hospitals.
pub const DEFAULT_BED_CAPACITY: u32 = 1331;

/// Number of days between the two points of the weekly comparison.
pub const WEEK_DAYS: usize = 7;
