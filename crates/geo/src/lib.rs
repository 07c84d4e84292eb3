//! Geometry math for the culturemap API.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Coordinate validation
//! - Zoom-dependent grid cells for map clustering
//! - Bounding boxes and ring-based polygon containment
//! - GeoJSON / WKT point parsing
//! - Batch distance ranking with optional parallelism
//!
//! Coordinates are always exchanged as `[longitude, latitude]` in GeoJSON
//! shapes; [`Coordinate`] names its fields explicitly to avoid mix-ups.
//!
//! # Example
//!
//! ```
//! use culturemap_geo::{haversine_distance, Coordinate};
//!
//! let opera = Coordinate::new(50.8396, 12.9275);      // Chemnitz opera house
//! let karl_marx = Coordinate::new(50.8335, 12.9202);  // Karl Marx monument
//!
//! let distance_km = haversine_distance(&opera, &karl_marx);
//! assert!(distance_km > 0.5 && distance_km < 1.2);
//! ```

mod bbox;
pub mod batch;
mod error;
mod grid;
mod haversine;
mod point;
mod polygon;

pub use bbox::BoundingBox;
pub use batch::{rank_within_radius, Ranked};
pub use error::{GeoError, Result};
pub use grid::{cell_size_for_zoom, grid_cell, GridCell, REFERENCE_CELL_SIZE, REFERENCE_ZOOM};
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use point::{parse_point, GeoPoint};
pub use polygon::{Area, Polygon, Ring};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate from GeoJSON `[lng, lat]` order.
    #[inline]
    pub fn from_lng_lat([lng, lat]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }

    /// Returns the coordinate in GeoJSON `[lng, lat]` order.
    #[inline]
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Validates the coordinate, returning it unchanged when in range.
    ///
    /// NaN fails every comparison and is therefore rejected as well.
    pub fn validate(self) -> Result<Self> {
        validate_lat_lng(self.latitude, self.longitude)?;
        Ok(self)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

/// Fails with [`GeoError::InvalidCoordinate`] when `lat` is outside [-90, 90]
/// or `lng` is outside [-180, 180].
pub fn validate_lat_lng(lat: f64, lng: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::InvalidCoordinate(format!(
            "latitude {lat} is outside [-90, 90]"
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(GeoError::InvalidCoordinate(format!(
            "longitude {lng} is outside [-180, 180]"
        )));
    }
    Ok(())
}
