//! JSON dataset loading.
//!
//! Expected document:
//!
//! ```json
//! {
//!   "cultural_sites": [{"id": "...", "name": "...", "category": "museum",
//!                       "location": {"type": "Point", "coordinates": [12.92, 50.83]}}],
//!   "parking_lots":   [{"id": "...", "name": "...", "parking_type": "car",
//!                       "location": "POINT(12.92 50.83)"}],
//!   "districts":      [{"id": "...", "name": "Zentrum",
//!                       "geometry": {"type": "Polygon", "coordinates": [...]}}]
//! }
//! ```
//!
//! Every section is optional. Records that fail to parse, lie outside the
//! valid coordinate range, or carry a non-areal district geometry are
//! skipped with a warning instead of failing the whole load.

use crate::error::{Result, StoreError};
use crate::model::{CulturalSite, District, Located, ParkingLot, Properties};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Parsed records, ready to be indexed.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub sites: Vec<CulturalSite>,
    pub parking_lots: Vec<ParkingLot>,
    pub districts: Vec<District>,
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    cultural_sites: Vec<Value>,
    #[serde(default)]
    parking_lots: Vec<Value>,
    #[serde(default)]
    districts: Vec<Value>,
}

#[derive(Deserialize)]
struct RawDistrict {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    geometry: geojson::Geometry,
    #[serde(default)]
    properties: Properties,
}

impl Dataset {
    /// Reads and parses a dataset file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let dataset = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            sites = dataset.sites.len(),
            parking_lots = dataset.parking_lots.len(),
            districts = dataset.districts.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Parses a dataset document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(content)?;

        Ok(Self {
            sites: parse_located(raw.cultural_sites, "cultural site"),
            parking_lots: parse_located(raw.parking_lots, "parking lot"),
            districts: raw
                .districts
                .into_iter()
                .enumerate()
                .filter_map(|(i, value)| match parse_district(value) {
                    Ok(district) => Some(district),
                    Err(reason) => {
                        warn!(index = i, %reason, "Skipping district record");
                        None
                    }
                })
                .collect(),
        })
    }
}

fn parse_located<T: DeserializeOwned + Located>(values: Vec<Value>, kind: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let record: T = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(index = i, kind, error = %e, "Skipping malformed record");
                    return None;
                }
            };
            match record.coordinate().validate() {
                Ok(_) => Some(record),
                Err(e) => {
                    warn!(index = i, kind, error = %e, "Skipping record with invalid location");
                    None
                }
            }
        })
        .collect()
}

fn parse_district(value: Value) -> std::result::Result<District, String> {
    let raw: RawDistrict = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| District::name_from_properties(&raw.properties))
        .ok_or_else(|| "district has no name".to_string())?;
    let id = raw.id.unwrap_or_else(|| name.clone());

    District::new(id, name, raw.geometry, raw.properties).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ParkingType};
    use culturemap_geo::Coordinate;
    use serde_json::json;

    fn square(lng: f64, lat: f64, size: f64) -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[
                [lng, lat], [lng + size, lat], [lng + size, lat + size], [lng, lat + size], [lng, lat]
            ]]
        })
    }

    #[test]
    fn test_parses_all_sections() {
        let doc = json!({
            "cultural_sites": [{
                "id": "s1", "name": "Opernhaus", "category": "theatre",
                "location": {"type": "Point", "coordinates": [12.9275, 50.8396]}
            }],
            "parking_lots": [{
                "id": "p1", "name": "Theaterplatz", "parking_type": "car",
                "location": "POINT(12.9280 50.8390)", "capacity": 120
            }],
            "districts": [{
                "id": "d1", "name": "Zentrum", "geometry": square(12.90, 50.82, 0.04)
            }]
        });

        let dataset = Dataset::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(dataset.sites.len(), 1);
        assert_eq!(dataset.sites[0].category, Category::Theatre);
        assert_eq!(dataset.parking_lots[0].parking_type, ParkingType::Car);
        assert_eq!(dataset.parking_lots[0].capacity, Some(120));
        assert_eq!(dataset.districts[0].name, "Zentrum");
        assert!(dataset.districts[0].area.contains(&Coordinate::new(50.84, 12.92)));
    }

    #[test]
    fn test_skips_bad_records() {
        let doc = json!({
            "cultural_sites": [
                {"id": "ok", "name": "A", "category": "museum",
                 "location": {"type": "Point", "coordinates": [12.92, 50.83]}},
                {"id": "bad-lat", "name": "B", "category": "museum",
                 "location": {"type": "Point", "coordinates": [12.92, 95.0]}},
                {"id": "bad-category", "name": "C", "category": "cinema",
                 "location": {"type": "Point", "coordinates": [12.92, 50.83]}}
            ],
            "districts": [
                {"name": "Line", "geometry": {"type": "LineString", "coordinates": [[12.9, 50.8], [13.0, 50.9]]}},
                {"geometry": square(12.9, 50.8, 0.01)}
            ]
        });

        let dataset = Dataset::from_json_str(&doc.to_string()).unwrap();
        let ids: Vec<_> = dataset.sites.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
        assert!(dataset.districts.is_empty());
    }

    #[test]
    fn test_district_name_falls_back_to_properties() {
        let doc = json!({
            "districts": [{
                "geometry": square(12.9, 50.8, 0.01),
                "properties": {"STADTTNAME": "Kaßberg", "STADTTEIL": "21"}
            }]
        });

        let dataset = Dataset::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(dataset.districts[0].name, "Kaßberg");
        assert_eq!(dataset.districts[0].id, "Kaßberg");
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let dataset = Dataset::from_json_str("{}").unwrap();
        assert!(dataset.sites.is_empty());
        assert!(dataset.parking_lots.is_empty());
        assert!(dataset.districts.is_empty());
    }

    #[test]
    fn test_invalid_document_fails() {
        assert!(matches!(
            Dataset::from_json_str("[1, 2, 3]"),
            Err(StoreError::Dataset(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, r#"{"cultural_sites": []}"#).unwrap();

        let dataset = Dataset::load(&path).await.unwrap();
        assert!(dataset.sites.is_empty());

        let missing = Dataset::load(dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(StoreError::Io { .. })));
    }
}
