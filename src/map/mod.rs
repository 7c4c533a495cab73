//! Choropleth styling for the district map.
//!
//! The map itself is drawn by a tiled-map front-end; this module decides how
//! each district looks and describes the base layer and initial view.

use serde::Serialize;

use crate::domain::CaseBand;

const TILE_URL_TEMPLATE: &str = "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}";
const TILE_STYLE_ID: &str = "mapbox/light-v9";
const TILE_ATTRIBUTION: &str = "Contributors, Imagery © <a href=\"https://www.mapbox.com/\">Mapbox</a>";

/// Band a district by its case count.
///
/// Comparisons are strict, so a count exactly on a threshold falls into the
/// band below it.
pub fn bucket_color(cases: i64) -> CaseBand {
    if cases > 7000 {
        CaseBand::Severe
    } else if cases > 5000 {
        CaseBand::High
    } else if cases > 3000 {
        CaseBand::Elevated
    } else {
        CaseBand::Baseline
    }
}

/// Resting style of a district polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStyle {
    pub fill_color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    pub color: &'static str,
    pub dash_array: &'static str,
    pub fill_opacity: f64,
}

impl DistrictStyle {
    pub fn for_cases(cases: i64) -> Self {
        Self {
            fill_color: bucket_color(cases).hex(),
            weight: 2,
            opacity: 1.0,
            color: "#000",
            dash_array: "1",
            fill_opacity: 0.6,
        }
    }
}

/// Border override applied while the pointer hovers a district.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStyle {
    pub weight: u32,
    pub color: &'static str,
    pub dash_array: &'static str,
    pub fill_opacity: f64,
}

pub const HOVER_HIGHLIGHT: HighlightStyle = HighlightStyle {
    weight: 2,
    color: "#87CEEF",
    dash_array: "1",
    fill_opacity: 0.7,
};

/// Base tile layer under the districts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url_template: String,
    pub id: &'static str,
    pub attribution: &'static str,
    pub tile_size: u32,
    pub zoom_offset: i32,
}

impl TileLayer {
    /// The token is appended as a query parameter when present.
    pub fn mapbox(access_token: Option<&str>) -> Self {
        let url_template = match access_token {
            Some(token) => format!("{TILE_URL_TEMPLATE}?access_token={token}"),
            None => TILE_URL_TEMPLATE.to_string(),
        };
        Self {
            url_template,
            id: TILE_STYLE_ID,
            attribution: TILE_ATTRIBUTION,
            tile_size: 512,
            zoom_offset: -1,
        }
    }
}

/// Initial centre and zoom of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    /// `[latitude, longitude]`.
    pub center: [f64; 2],
    pub zoom: f64,
}

pub const DEFAULT_VIEW: MapView = MapView {
    center: [55.01, -1.65],
    zoom: 10.5,
};

/// Everything the map front-end needs besides the features.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayout {
    pub view: MapView,
    pub tile_layer: TileLayer,
    pub hover: HighlightStyle,
}

impl MapLayout {
    pub fn new(access_token: Option<&str>) -> Self {
        Self {
            view: DEFAULT_VIEW,
            tile_layer: TileLayer::mapbox(access_token),
            hover: HOVER_HIGHLIGHT,
        }
    }
}
