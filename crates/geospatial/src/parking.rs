//! Parking lot search.

use crate::error::{QueryError, Result};
use crate::service::{round_to, GeoService, LatLng};
use culturemap_geo::Coordinate;
use culturemap_store::{ParkingFilter, ParkingLot, ParkingType};
use serde::Serialize;

/// Parking near a point.
#[derive(Debug, Clone, Default)]
pub struct ParkingNearQuery {
    pub lat: f64,
    pub lng: f64,
    /// Meters; the configured parking radius applies when absent
    pub max_distance_m: Option<f64>,
    pub parking_type: Option<ParkingType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParkingWithDistance {
    pub lot: ParkingLot,
    pub distance_meters: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParkingNearResponse {
    pub parking_lots: Vec<ParkingWithDistance>,
    pub total: usize,
    pub search_center: LatLng,
    pub max_distance_meters: f64,
    pub parking_type_filter: Option<ParkingType>,
}

/// Parking listing, optionally restricted to a district.
#[derive(Debug, Clone, Default)]
pub struct ParkingListQuery {
    pub parking_type: Option<ParkingType>,
    pub district: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingListFilters {
    pub parking_type: Option<ParkingType>,
    pub district: Option<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParkingListResponse {
    pub parking_lots: Vec<ParkingLot>,
    pub total: usize,
    pub filters: ParkingListFilters,
}

impl GeoService {
    /// Active parking lots within the radius, nearest first.
    pub async fn parking_near(&self, query: &ParkingNearQuery) -> Result<ParkingNearResponse> {
        let center = Coordinate::new(query.lat, query.lng).validate()?;
        let radius = self.resolve_radius(query.max_distance_m, self.search.parking_radius_m)?;
        let filter = ParkingFilter {
            parking_type: query.parking_type,
        };

        let parking_lots: Vec<ParkingWithDistance> = self
            .store
            .find_parking_near(center, radius, &filter)
            .await?
            .into_iter()
            .map(|r| ParkingWithDistance {
                lot: r.item,
                distance_meters: round_to(r.distance_m, 2),
            })
            .collect();

        Ok(ParkingNearResponse {
            total: parking_lots.len(),
            parking_lots,
            search_center: center.into(),
            max_distance_meters: radius,
            parking_type_filter: query.parking_type,
        })
    }

    /// Active parking lots, optionally inside a named district.
    ///
    /// Fails with [`QueryError::DistrictNotFound`] for an unknown district.
    pub async fn list_parking(&self, query: &ParkingListQuery) -> Result<ParkingListResponse> {
        let limit = query.limit.unwrap_or(self.search.parking_limit);
        let filter = ParkingFilter {
            parking_type: query.parking_type,
        };

        let district = match &query.district {
            Some(name) => Some(
                self.store
                    .find_district(name)
                    .await?
                    .ok_or_else(|| QueryError::DistrictNotFound(name.clone()))?,
            ),
            None => None,
        };

        let parking_lots = self
            .store
            .find_parking(district.as_ref().map(|d| &d.area), &filter, limit)
            .await?;

        Ok(ParkingListResponse {
            total: parking_lots.len(),
            parking_lots,
            filters: ParkingListFilters {
                parking_type: query.parking_type,
                district: query.district.clone(),
                limit,
            },
        })
    }
}
