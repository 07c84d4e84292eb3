//! Query service shared by all orchestrators.

use crate::error::{QueryError, Result};
use culturemap_core::config::SearchConfig;
use culturemap_geo::Coordinate;
use culturemap_store::SpatialStore;
use serde::Serialize;
use std::sync::Arc;

/// Entry point for geospatial queries.
///
/// Cheap to clone; the store is shared.
#[derive(Clone)]
pub struct GeoService {
    pub(crate) store: Arc<dyn SpatialStore>,
    pub(crate) search: SearchConfig,
}

impl GeoService {
    /// Create a service over a store with the given search limits
    pub fn new(store: Arc<dyn SpatialStore>, search: SearchConfig) -> Self {
        Self { store, search }
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn SpatialStore> {
        &self.store
    }

    /// Search limits in effect
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Radius from the request or `default`, checked against (0, max].
    pub(crate) fn resolve_radius(&self, requested: Option<f64>, default: f64) -> Result<f64> {
        let radius = requested.unwrap_or(default);
        let max = self.search.max_radius_m;
        if radius > 0.0 && radius <= max {
            Ok(radius)
        } else {
            Err(QueryError::InvalidRadius(format!(
                "{} meters (must be between 1 and {} meters)",
                radius, max
            )))
        }
    }
}

impl std::fmt::Debug for GeoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoService")
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

/// A `{lat, lng}` pair as echoed in responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for LatLng {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.latitude,
            lng: c.longitude,
        }
    }
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Minutes needed to cover `distance_km` at `speed_kmh`, rounded.
pub(crate) fn travel_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    (distance_km / speed_kmh * 60.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(123.456_789, 2), 123.46);
        assert_eq!(round_to(0.123_449, 3), 0.123);
        assert_eq!(round_to(0.0, 3), 0.0);
    }

    #[test]
    fn test_travel_minutes() {
        assert_eq!(travel_minutes(0.0, 5.0), 0);
        assert_eq!(travel_minutes(1.0, 5.0), 12);
        assert_eq!(travel_minutes(0.04, 5.0), 0);
        assert_eq!(travel_minutes(0.05, 5.0), 1);
    }

    #[test]
    fn test_resolve_radius() {
        let service = fixtures::service();
        assert_eq!(service.resolve_radius(None, 1000.0).unwrap(), 1000.0);
        assert_eq!(service.resolve_radius(Some(50_000.0), 1000.0).unwrap(), 50_000.0);
        for bad in [0.0, -5.0, 50_000.5, f64::NAN] {
            assert!(matches!(
                service.resolve_radius(Some(bad), 1000.0),
                Err(QueryError::InvalidRadius(_))
            ));
        }
    }
}
