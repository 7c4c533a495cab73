//! Chart payloads for the regional bar charts.
//!
//! The dashboard does not draw charts for the web itself; it hands a fully
//! described bar chart (labels, values, styling) to a charting front-end.
//! `ChartSpec` serializes to the nested `data`/`options` layout those
//! front-ends consume.

use serde::Serialize;

use crate::domain::{ChartKind, TimeSeries};

/// Fixed styling for one of the regional charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub dataset_label: &'static str,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub hover_border_color: &'static str,
    /// Title text after the region name.
    pub title_suffix: &'static str,
    /// Bar colour for terminal rendering (alpha dropped).
    pub bar_rgb: (u8, u8, u8),
}

impl ChartStyle {
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Infected => ChartStyle {
                dataset_label: "Number of Infected",
                background_color: "rgba(54, 162, 235, 0.6)",
                border_color: "#000",
                hover_border_color: "#7F9800",
                title_suffix: "Trend in Infected",
                bar_rgb: (54, 162, 235),
            },
            ChartKind::Deaths => ChartStyle {
                dataset_label: "Number of Dead",
                background_color: "rgba(255, 159, 64, 0.6)",
                border_color: "#000",
                hover_border_color: "#FF4C68",
                title_suffix: "Trend in Deaths",
                bar_rgb: (255, 159, 64),
            },
            ChartKind::Hospitalised => ChartStyle {
                dataset_label: "Hospital Occupancy",
                background_color: "rgba(255, 99, 132, 1)",
                border_color: "#000",
                hover_border_color: "#66FFFF",
                title_suffix: "Hospital Occupancy Due to Covid-19",
                bar_rgb: (255, 99, 132),
            },
        }
    }

    pub fn title(&self, region: &str) -> String {
        format!("{region}: {}", self.title_suffix)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<i64>,
    pub background_color: String,
    pub border_width: u32,
    pub border_color: String,
    pub hover_border_width: u32,
    pub hover_border_color: String,
    pub fill: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub layout: LayoutOptions,
    pub scales: ScaleOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub font_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutOptions {
    pub padding: Padding,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
    pub top: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOptions {
    pub y_axes: Vec<AxisOptions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisOptions {
    pub ticks: TickOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOptions {
    pub begin_at_zero: bool,
}

impl ChartSpec {
    /// Bar chart for one of the regional series.
    pub fn for_kind(kind: ChartKind, region: &str, series: &TimeSeries) -> Self {
        let style = ChartStyle::for_kind(kind);
        ChartSpec {
            chart_type: "bar",
            data: ChartData {
                labels: series.labels(),
                datasets: vec![Dataset {
                    label: style.dataset_label.to_string(),
                    data: series.values(),
                    background_color: style.background_color.to_string(),
                    border_width: 1,
                    border_color: style.border_color.to_string(),
                    hover_border_width: 2,
                    hover_border_color: style.hover_border_color.to_string(),
                    fill: false,
                }],
            },
            options: ChartOptions {
                title: TitleOptions {
                    display: true,
                    text: style.title(region),
                    font_size: 20,
                },
                legend: LegendOptions {
                    display: true,
                    position: LegendPosition::Bottom,
                    labels: LegendLabels {
                        font_color: "#000".to_string(),
                    },
                },
                layout: LayoutOptions {
                    padding: Padding::default(),
                },
                scales: ScaleOptions {
                    y_axes: vec![AxisOptions {
                        ticks: TickOptions { begin_at_zero: true },
                    }],
                },
            },
        }
    }
}
