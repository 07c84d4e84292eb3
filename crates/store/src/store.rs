//! Store adapter contract.

use crate::error::Result;
use crate::model::{CulturalSite, District, ParkingFilter, ParkingLot, SiteFilter, StoreCounts};
use async_trait::async_trait;
use culturemap_geo::{Area, BoundingBox, Coordinate, Ranked};

/// Read-only geospatial queries over the record store.
///
/// Filters are applied before any distance or containment work. Radius
/// queries fail with [`StoreError::InvalidRadius`](crate::StoreError::InvalidRadius)
/// unless the radius is strictly positive. Backend failures surface as
/// [`StoreError::Unavailable`](crate::StoreError::Unavailable).
#[async_trait]
pub trait SpatialStore: Send + Sync {
    /// Sites within `max_distance_m` of `center`, nearest first.
    async fn find_sites_near(
        &self,
        center: Coordinate,
        max_distance_m: f64,
        filter: &SiteFilter,
    ) -> Result<Vec<Ranked<CulturalSite>>>;

    /// Sites inside the area (polygon holes excluded, multipolygons unioned).
    async fn find_sites_within_area(
        &self,
        area: &Area,
        filter: &SiteFilter,
    ) -> Result<Vec<CulturalSite>>;

    /// Sites inside the box, edges inclusive.
    async fn find_sites_within_box(
        &self,
        bbox: &BoundingBox,
        filter: &SiteFilter,
    ) -> Result<Vec<CulturalSite>>;

    /// Active sites for the given ids, in input order.
    ///
    /// Unknown or inactive ids are left out.
    async fn find_sites_by_ids(&self, ids: &[String]) -> Result<Vec<CulturalSite>>;

    /// Parking lots within `max_distance_m` of `center`, nearest first.
    async fn find_parking_near(
        &self,
        center: Coordinate,
        max_distance_m: f64,
        filter: &ParkingFilter,
    ) -> Result<Vec<Ranked<ParkingLot>>>;

    /// Parking lots inside the area, or all lots when `area` is `None`,
    /// capped at `limit`.
    async fn find_parking(
        &self,
        area: Option<&Area>,
        filter: &ParkingFilter,
        limit: usize,
    ) -> Result<Vec<ParkingLot>>;

    /// District with exactly this canonical name.
    async fn find_district(&self, name: &str) -> Result<Option<District>>;

    /// Every district in load order.
    async fn districts(&self) -> Result<Vec<District>>;

    /// Record totals.
    async fn counts(&self) -> Result<StoreCounts>;
}
