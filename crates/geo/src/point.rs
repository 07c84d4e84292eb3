//! GeoJSON point type and point parsing.
//!
//! Supports parsing coordinates from:
//! - GeoJSON format: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT format: `POINT(lng lat)`

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// GeoJSON Point as stored on every located record.
///
/// Coordinate order is always `[longitude, latitude]`. Deserialization
/// accepts either the GeoJSON object or a WKT `POINT(lng lat)` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct GeoPoint {
    /// Always "Point"
    #[serde(rename = "type")]
    kind: PointKind,
    /// [longitude, latitude] array
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum PointKind {
    #[default]
    Point,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [lng, lat],
        }
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    /// Converts to a [`Coordinate`].
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_lng_lat(self.coordinates)
    }
}

impl From<Coordinate> for GeoPoint {
    fn from(coord: Coordinate) -> Self {
        Self::new(coord.longitude, coord.latitude)
    }
}

impl TryFrom<serde_json::Value> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        parse_point(&value)
            .map(GeoPoint::from)
            .ok_or_else(|| GeoError::InvalidCoordinate(format!("not a point: {value}")))
    }
}

/// Parse a point from a JSON value.
///
/// # Returns
/// * `Some(Coordinate)` if parsing succeeds
/// * `None` if the value is null or cannot be parsed
///
/// # Example
/// ```
/// use culturemap_geo::parse_point;
/// use serde_json::json;
///
/// // GeoJSON format
/// let geojson = json!({"type": "Point", "coordinates": [12.9214, 50.8279]});
/// let coord = parse_point(&geojson).unwrap();
/// assert!((coord.latitude - 50.8279).abs() < 0.0001);
///
/// // WKT format
/// let wkt = json!("POINT(12.9214 50.8279)");
/// let coord = parse_point(&wkt).unwrap();
/// assert!((coord.latitude - 50.8279).abs() < 0.0001);
/// ```
pub fn parse_point(value: &serde_json::Value) -> Option<Coordinate> {
    if value.is_null() {
        return None;
    }

    if value.is_object() {
        if let Some(kind) = value.get("type").and_then(|t| t.as_str()) {
            if kind != "Point" {
                return None;
            }
        }
        if let Some(coords) = value.get("coordinates").and_then(|c| c.as_array()) {
            if coords.len() >= 2 {
                let lng = coords[0].as_f64()?;
                let lat = coords[1].as_f64()?;
                return Some(Coordinate::new(lat, lng));
            }
        }
    }

    if let Some(wkt) = value.as_str() {
        return parse_wkt_point(wkt).ok();
    }

    None
}

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`
fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();

    if !wkt.starts_with("POINT(") && !wkt.starts_with("POINT (") {
        return Err(GeoError::InvalidWkt(format!("Expected POINT, got: {}", wkt)));
    }

    let start = wkt.find('(').ok_or_else(|| GeoError::InvalidWkt("Missing '('".into()))?;
    let end = wkt.find(')').ok_or_else(|| GeoError::InvalidWkt("Missing ')'".into()))?;

    if start >= end {
        return Err(GeoError::InvalidWkt("Invalid parentheses".into()));
    }

    let parts: Vec<&str> = wkt[start + 1..end].split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    Ok(Coordinate::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_geojson_point() {
        let value = json!({
            "type": "Point",
            "coordinates": [12.9214, 50.8279]
        });

        let coord = parse_point(&value).unwrap();
        assert!((coord.latitude - 50.8279).abs() < 0.0001);
        assert!((coord.longitude - 12.9214).abs() < 0.0001);
    }

    #[test]
    fn test_parse_geojson_without_type() {
        let value = json!({ "coordinates": [12.9214, 50.8279] });
        let coord = parse_point(&value).unwrap();
        assert!((coord.latitude - 50.8279).abs() < 0.0001);
    }

    #[test]
    fn test_parse_rejects_other_geometry_types() {
        let value = json!({ "type": "LineString", "coordinates": [[12.9, 50.8], [12.95, 50.85]] });
        assert!(parse_point(&value).is_none());
    }

    #[test]
    fn test_parse_wkt_point() {
        let coord = parse_point(&json!("POINT(12.9214 50.8279)")).unwrap();
        assert!((coord.latitude - 50.8279).abs() < 0.0001);
        assert!((coord.longitude - 12.9214).abs() < 0.0001);

        let spaced = parse_point(&json!("POINT (12.9214 50.8279)")).unwrap();
        assert_eq!(coord, spaced);
    }

    #[test]
    fn test_parse_null_returns_none() {
        assert!(parse_point(&json!(null)).is_none());
    }

    #[test]
    fn test_parse_invalid_wkt() {
        assert!(parse_wkt_point("POLYGON((0 0, 1 1, 1 0, 0 0))").is_err());
        assert!(parse_wkt_point("POINT(12.9)").is_err());
    }

    #[test]
    fn test_geopoint_deserializes_both_shapes() {
        let from_object: GeoPoint =
            serde_json::from_value(json!({"type": "Point", "coordinates": [12.9214, 50.8279]})).unwrap();
        let from_wkt: GeoPoint = serde_json::from_value(json!("POINT(12.9214 50.8279)")).unwrap();
        assert_eq!(from_object, from_wkt);
        assert_eq!(from_object.lng(), 12.9214);
        assert_eq!(from_object.lat(), 50.8279);
    }

    #[test]
    fn test_geopoint_serializes_as_geojson() {
        let point = GeoPoint::new(12.9214, 50.8279);
        let value = serde_json::to_value(point).unwrap();
        assert_eq!(value, json!({"type": "Point", "coordinates": [12.9214, 50.8279]}));
    }
}
