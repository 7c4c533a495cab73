//! GeoJSON district ingest and styled export.
//!
//! Only the parts the dashboard needs are interpreted (`properties.cases` and a
//! display name); geometry is carried through untouched so the export can be
//! handed to a map front-end as-is.

use std::io::Write;

use serde_json::{Map, Value};

use crate::data::Fetcher;
use crate::domain::{CaseBand, Source};
use crate::error::{AppError, LoadError};
use crate::io::ingest::RowError;
use crate::map::{DistrictStyle, MapLayout, bucket_color};

/// A single district polygon with its case count.
#[derive(Debug, Clone)]
pub struct District {
    pub name: String,
    pub cases: i64,
    pub band: CaseBand,
    /// The original feature, geometry included.
    pub feature: Value,
}

/// All usable districts plus the features that had to be skipped.
#[derive(Debug, Clone)]
pub struct DistrictMap {
    pub districts: Vec<District>,
    /// `line` holds the 1-based feature index.
    pub skipped: Vec<RowError>,
}

impl DistrictMap {
    /// Number of districts in each band, most severe first.
    pub fn band_counts(&self) -> Vec<(CaseBand, usize)> {
        CaseBand::ALL
            .into_iter()
            .map(|band| (band, self.districts.iter().filter(|d| d.band == band).count()))
            .collect()
    }
}

/// Fetch and parse a district FeatureCollection.
pub fn load_districts(fetcher: &Fetcher, source: &Source) -> Result<DistrictMap, LoadError> {
    let text = fetcher.fetch_text(source)?;
    let map = parse_districts(&text, &source.display())?;
    tracing::info!(
        source = %source.display(),
        districts = map.districts.len(),
        skipped = map.skipped.len(),
        "loaded district map"
    );
    Ok(map)
}

pub fn parse_districts(text: &str, source_name: &str) -> Result<DistrictMap, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        source_name: source_name.to_string(),
        reason,
    };

    let root: Value = serde_json::from_str(text).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    if root.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(malformed("expected a FeatureCollection".to_string()));
    }
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing `features` array".to_string()))?;

    let mut districts = Vec::with_capacity(features.len());
    let mut skipped = Vec::new();

    for (idx, feature) in features.iter().enumerate() {
        let props = feature.get("properties").and_then(Value::as_object);
        let name = district_name(feature, props, idx);

        let Some(cases) = props.and_then(|p| p.get("cases")).and_then(Value::as_i64) else {
            let message = format!("District '{name}' has no integer `cases` property");
            tracing::warn!(source = source_name, feature = idx + 1, %message, "skipping feature");
            skipped.push(RowError { line: idx + 1, message });
            continue;
        };

        districts.push(District {
            name,
            cases,
            band: bucket_color(cases),
            feature: feature.clone(),
        });
    }

    Ok(DistrictMap { districts, skipped })
}

fn district_name(feature: &Value, props: Option<&Map<String, Value>>, idx: usize) -> String {
    const NAME_KEYS: [&str; 3] = ["name", "LAD13NM", "WD13NM"];
    props
        .and_then(|p| NAME_KEYS.iter().find_map(|k| p.get(*k).and_then(Value::as_str)))
        .map(str::to_string)
        .or_else(|| feature.get("id").map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
        .unwrap_or_else(|| format!("District {}", idx + 1))
}

/// Build the styled FeatureCollection handed to the map front-end.
///
/// Each feature gains `properties.style`; the collection gains a top-level
/// `map` member with view, tile layer and hover style.
pub fn styled_collection(map: &DistrictMap, layout: &MapLayout) -> Result<Value, AppError> {
    let mut features = Vec::with_capacity(map.districts.len());
    for d in &map.districts {
        let style = serde_json::to_value(DistrictStyle::for_cases(d.cases))
            .map_err(|e| AppError::new(2, format!("Failed to encode district style: {e}")))?;
        let mut feature = d.feature.clone();
        if let Some(obj) = feature.as_object_mut() {
            let props = obj
                .entry("properties")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(props) = props.as_object_mut() {
                props.insert("style".to_string(), style);
            }
        }
        features.push(feature);
    }

    let layout = serde_json::to_value(layout)
        .map_err(|e| AppError::new(2, format!("Failed to encode map layout: {e}")))?;

    Ok(serde_json::json!({
        "type": "FeatureCollection",
        "map": layout,
        "features": features,
    }))
}

pub fn write_styled_geojson<W: Write>(writer: W, map: &DistrictMap, layout: &MapLayout) -> Result<(), AppError> {
    let value = styled_collection(map, layout)?;
    serde_json::to_writer_pretty(writer, &value)
        .map_err(|e| AppError::new(2, format!("Failed to write styled GeoJSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Byker", "cases": 7200},
             "geometry": {"type": "Point", "coordinates": [-1.57, 54.98]}},
            {"type": "Feature", "id": "E05001099", "properties": {"cases": 4100},
             "geometry": null},
            {"type": "Feature", "properties": {"name": "Jesmond", "cases": "n/a"},
             "geometry": null},
            {"type": "Feature", "properties": {"LAD13NM": "Gosforth", "cases": 3000},
             "geometry": null}
        ]
    }"#;

    #[test]
    fn parses_cases_and_names() {
        let map = parse_districts(SAMPLE, "map.geojson").unwrap();

        let names: Vec<_> = map.districts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Byker", "E05001099", "Gosforth"]);
        assert_eq!(map.districts[0].band, CaseBand::Severe);
        assert_eq!(map.districts[1].band, CaseBand::Elevated);
        assert_eq!(map.districts[2].band, CaseBand::Baseline);

        assert_eq!(map.skipped.len(), 1);
        assert_eq!(map.skipped[0].line, 3);
    }

    #[test]
    fn band_counts_cover_every_band() {
        let map = parse_districts(SAMPLE, "map.geojson").unwrap();
        assert_eq!(
            map.band_counts(),
            vec![
                (CaseBand::Severe, 1),
                (CaseBand::High, 0),
                (CaseBand::Elevated, 1),
                (CaseBand::Baseline, 1),
            ]
        );
    }

    #[test]
    fn rejects_non_collections() {
        let err = parse_districts(r#"{"type": "Feature"}"#, "x").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        let err = parse_districts("not json", "x").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn styled_export_attaches_style_and_layout() {
        let map = parse_districts(SAMPLE, "map.geojson").unwrap();
        let layout = MapLayout::new(None);

        let mut buf = Vec::new();
        write_styled_geojson(&mut buf, &map, &layout).unwrap();
        let v: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["features"].as_array().unwrap().len(), 3);
        assert_eq!(v["features"][0]["properties"]["style"]["fillColor"], "#BD0026");
        assert_eq!(v["features"][0]["properties"]["style"]["dashArray"], "1");
        assert_eq!(v["features"][0]["geometry"]["type"], "Point");
        assert_eq!(v["map"]["view"]["zoom"], 10.5);
        assert_eq!(v["map"]["tileLayer"]["id"], "mapbox/light-v9");
        assert_eq!(v["map"]["hover"]["color"], "#87CEEF");
    }
}
