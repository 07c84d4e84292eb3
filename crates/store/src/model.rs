//! Record types served by the store.
//!
//! All records are read-only from the query side. Locations are GeoJSON
//! points in `[longitude, latitude]` order.

use chrono::{DateTime, Utc};
use culturemap_geo::{Area, Coordinate, GeoPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Free-form attributes carried over from the import source.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Unknown value for an enumerated field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Field being parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
    /// Accepted values, comma separated
    pub expected: &'static str,
}

/// Site category.
///
/// Declaration order is the stable enumeration order used for tie breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Theatre,
    Museum,
    Restaurant,
    Artwork,
}

impl Category {
    /// Every category in enumeration order
    pub const ALL: [Category; 4] = [
        Category::Theatre,
        Category::Museum,
        Category::Restaurant,
        Category::Artwork,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Theatre => "theatre",
            Category::Museum => "museum",
            Category::Restaurant => "restaurant",
            Category::Artwork => "artwork",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "category",
                value: s.to_string(),
                expected: "theatre, museum, restaurant, artwork",
            })
    }
}

/// Kind of vehicle a parking lot serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkingType {
    Bus,
    Caravan,
    Car,
    Bicycle,
}

impl ParkingType {
    /// Every parking type in enumeration order
    pub const ALL: [ParkingType; 4] = [
        ParkingType::Bus,
        ParkingType::Caravan,
        ParkingType::Car,
        ParkingType::Bicycle,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ParkingType::Bus => "bus",
            ParkingType::Caravan => "caravan",
            ParkingType::Car => "car",
            ParkingType::Bicycle => "bicycle",
        }
    }
}

impl fmt::Display for ParkingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParkingType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParkingType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "parking type",
                value: s.to_string(),
                expected: "bus, caravan, car, bicycle",
            })
    }
}

fn default_true() -> bool {
    true
}

fn default_source() -> String {
    "local".to_string()
}

/// A cultural site (theatre, museum, restaurant or public artwork).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalSite {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    pub location: GeoPoint,
    /// Soft-delete flag; inactive sites are hidden unless asked for
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub properties: Properties,
    /// Import source tag such as `local` or `overpass`
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A parking lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub parking_type: ParkingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_spots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub properties: Properties,
}

/// A city district with its boundary.
///
/// `area` is the containment-ready form of `geometry`, built once at load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub geometry: geojson::Geometry,
    pub properties: Properties,
    #[serde(skip)]
    pub area: Area,
}

impl District {
    /// Property keys consulted, in order, when a record has no top-level name.
    pub const NAME_PROPERTIES: [&'static str; 3] = ["STADTTNAME", "name", "NAME"];

    /// Builds a district, deriving its area from `geometry`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        geometry: geojson::Geometry,
        properties: Properties,
    ) -> culturemap_geo::Result<Self> {
        let area = Area::from_geojson(&geometry)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            geometry,
            properties,
            area,
        })
    }

    /// Canonical name from properties, for records lacking a top-level name.
    pub fn name_from_properties(properties: &Properties) -> Option<String> {
        Self::NAME_PROPERTIES
            .iter()
            .filter_map(|key| properties.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(String::from)
    }
}

/// Records with a point location.
pub trait Located {
    /// Record position
    fn coordinate(&self) -> Coordinate;
}

impl Located for CulturalSite {
    fn coordinate(&self) -> Coordinate {
        self.location.coordinate()
    }
}

impl Located for ParkingLot {
    fn coordinate(&self) -> Coordinate {
        self.location.coordinate()
    }
}

/// Predicate for cultural site queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteFilter {
    /// Restrict to one category
    pub category: Option<Category>,
    /// Also return soft-deleted sites
    pub include_inactive: bool,
}

impl SiteFilter {
    /// Active sites, optionally of one category
    pub fn active(category: Option<Category>) -> Self {
        Self {
            category,
            include_inactive: false,
        }
    }

    /// True if `site` passes the filter
    pub fn matches(&self, site: &CulturalSite) -> bool {
        (self.include_inactive || site.is_active)
            && self.category.is_none_or(|c| c == site.category)
    }
}

/// Predicate for parking lot queries; inactive lots are never returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParkingFilter {
    /// Restrict to one parking type
    pub parking_type: Option<ParkingType>,
}

impl ParkingFilter {
    /// True if `lot` passes the filter
    pub fn matches(&self, lot: &ParkingLot) -> bool {
        lot.is_active && self.parking_type.is_none_or(|t| t == lot.parking_type)
    }
}

/// Record totals, used by health reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub sites: usize,
    pub parking_lots: usize,
    pub districts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn site(category: Category, is_active: bool) -> CulturalSite {
        serde_json::from_value(json!({
            "id": "s1",
            "name": "Opernhaus",
            "category": category,
            "location": {"type": "Point", "coordinates": [12.9275, 50.8396]},
            "is_active": is_active,
        }))
        .unwrap()
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!("Museum".parse::<Category>().unwrap(), Category::Museum);
        assert_eq!(Category::Artwork.to_string(), "artwork");
        let err = "cinema".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("cinema"));
    }

    #[test]
    fn test_parking_type_parse() {
        assert_eq!("bicycle".parse::<ParkingType>().unwrap(), ParkingType::Bicycle);
        assert!("boat".parse::<ParkingType>().is_err());
    }

    #[test]
    fn test_site_defaults() {
        let site = site(Category::Theatre, true);
        assert_eq!(site.source, "local");
        assert_eq!(site.view_count, 0);
        assert!(site.created_at.is_none());
        assert_eq!(site.coordinate(), Coordinate::new(50.8396, 12.9275));
    }

    #[test]
    fn test_site_accepts_wkt_location() {
        let site: CulturalSite = serde_json::from_value(json!({
            "id": "s2",
            "name": "Museum Gunzenhauser",
            "category": "museum",
            "location": "POINT(12.9245 50.8310)",
        }))
        .unwrap();
        assert!(site.is_active);
        assert_eq!(site.location.coordinates, [12.9245, 50.8310]);
    }

    #[test]
    fn test_site_filter() {
        let active_museum = site(Category::Museum, true);
        let inactive_museum = site(Category::Museum, false);

        assert!(SiteFilter::default().matches(&active_museum));
        assert!(!SiteFilter::default().matches(&inactive_museum));
        assert!(!SiteFilter::active(Some(Category::Theatre)).matches(&active_museum));

        let all = SiteFilter {
            category: Some(Category::Museum),
            include_inactive: true,
        };
        assert!(all.matches(&inactive_museum));
    }

    #[test]
    fn test_district_name_from_properties() {
        let mut props = Properties::new();
        props.insert("NAME".into(), json!("Fallback"));
        props.insert("STADTTNAME".into(), json!("Zentrum"));
        assert_eq!(District::name_from_properties(&props).as_deref(), Some("Zentrum"));

        let mut props = Properties::new();
        props.insert("STADTTNAME".into(), json!("  "));
        props.insert("name".into(), json!("Kaßberg"));
        assert_eq!(District::name_from_properties(&props).as_deref(), Some("Kaßberg"));

        assert!(District::name_from_properties(&Properties::new()).is_none());
    }
}
