//! Summary indicators derived from the most recent points of a series.
//!
//! Nothing here is cached: callers recompute from the current series each time.

use crate::domain::{RiskLevel, TimeSeries, WEEK_DAYS};
use crate::error::MetricError;

/// Latest value and week-over-week change of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMetrics {
    pub latest: i64,
    pub weekly_delta: Result<f64, MetricError>,
}

impl RegionMetrics {
    pub fn compute(series: &TimeSeries) -> Self {
        Self {
            latest: series.latest().value,
            weekly_delta: weekly_change_percent(series),
        }
    }

    pub fn risk(&self) -> Result<RiskLevel, MetricError> {
        self.weekly_delta.clone().map(classify_risk)
    }
}

/// Percentage change between the latest value and the value a week earlier.
///
/// Requires at least `WEEK_DAYS + 1` points and a non-zero baseline.
pub fn weekly_change_percent(series: &TimeSeries) -> Result<f64, MetricError> {
    let prior = series.back(WEEK_DAYS).ok_or(MetricError::SeriesTooShort {
        len: series.len(),
        required: WEEK_DAYS + 1,
    })?;
    if prior.value == 0 {
        return Err(MetricError::ZeroBaseline {
            label: prior.label.clone(),
        });
    }

    let latest = series.latest().value as f64;
    let prior = prior.value as f64;
    Ok((latest - prior) / prior * 100.0)
}

/// Bucket a weekly change into a risk tier.
///
/// `< 1` is low, `[1, 3)` is medium, `>= 3` is high.
pub fn classify_risk(delta: f64) -> RiskLevel {
    if delta < 1.0 {
        RiskLevel::Low
    } else if delta < 3.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Share of beds occupied, rounded up to a whole percent.
///
/// Not clamped: more patients than beds yields values above 100.
pub fn occupancy_percent(series: &TimeSeries, capacity: u32) -> Result<i64, MetricError> {
    if capacity == 0 {
        return Err(MetricError::ZeroCapacity);
    }
    let latest = series.latest().value as f64;
    Ok((latest / f64::from(capacity) * 100.0).ceil() as i64)
}

/// Display text for the availability indicator.
pub fn occupancy_text(percent: i64) -> String {
    format!("Beds Occupied: {percent}%")
}
