//! Test doubles for code written against [`SpatialStore`].

use crate::error::{Result, StoreError};
use crate::model::{CulturalSite, District, ParkingFilter, ParkingLot, SiteFilter, StoreCounts};
use crate::store::SpatialStore;
use async_trait::async_trait;
use culturemap_geo::{Area, BoundingBox, Coordinate, Ranked};

/// Store whose every read fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct FailingStore {
    reason: String,
}

impl FailingStore {
    /// Store failing with `reason` on every call.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl SpatialStore for FailingStore {
    async fn find_sites_near(&self, _: Coordinate, _: f64, _: &SiteFilter) -> Result<Vec<Ranked<CulturalSite>>> {
        self.fail()
    }

    async fn find_sites_within_area(&self, _: &Area, _: &SiteFilter) -> Result<Vec<CulturalSite>> {
        self.fail()
    }

    async fn find_sites_within_box(&self, _: &BoundingBox, _: &SiteFilter) -> Result<Vec<CulturalSite>> {
        self.fail()
    }

    async fn find_sites_by_ids(&self, _: &[String]) -> Result<Vec<CulturalSite>> {
        self.fail()
    }

    async fn find_parking_near(&self, _: Coordinate, _: f64, _: &ParkingFilter) -> Result<Vec<Ranked<ParkingLot>>> {
        self.fail()
    }

    async fn find_parking(&self, _: Option<&Area>, _: &ParkingFilter, _: usize) -> Result<Vec<ParkingLot>> {
        self.fail()
    }

    async fn find_district(&self, _: &str) -> Result<Option<District>> {
        self.fail()
    }

    async fn districts(&self) -> Result<Vec<District>> {
        self.fail()
    }

    async fn counts(&self) -> Result<StoreCounts> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_read_reports_the_reason() {
        let store = FailingStore::new("connection refused");

        let err = store.counts().await.unwrap_err();
        assert!(matches!(&err, StoreError::Unavailable(reason) if reason == "connection refused"));
        assert!(store.find_district("Zentrum").await.is_err());
        assert!(store
            .find_sites_near(Coordinate::new(50.83, 12.92), 100.0, &SiteFilter::default())
            .await
            .is_err());
    }
}
