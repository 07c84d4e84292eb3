//! In-memory store backed by R-tree indexes.

use crate::dataset::Dataset;
use crate::error::{Result, StoreError};
use crate::index::SpatialIndex;
use crate::model::{CulturalSite, District, ParkingFilter, ParkingLot, SiteFilter, StoreCounts};
use crate::store::SpatialStore;
use async_trait::async_trait;
use culturemap_geo::{Area, BoundingBox, Coordinate, Ranked};
use std::collections::HashMap;
use std::path::Path;

/// Immutable store holding every record in memory.
///
/// Built once from a [`Dataset`]; all queries are lock-free reads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sites: SpatialIndex<CulturalSite>,
    site_positions: HashMap<String, usize>,
    parking: SpatialIndex<ParkingLot>,
    districts: Vec<District>,
}

impl MemoryStore {
    /// Indexes the dataset. Duplicate site ids resolve to the first record.
    pub fn new(dataset: Dataset) -> Self {
        let mut site_positions = HashMap::with_capacity(dataset.sites.len());
        for (i, site) in dataset.sites.iter().enumerate() {
            site_positions.entry(site.id.clone()).or_insert(i);
        }

        Self {
            sites: SpatialIndex::new(dataset.sites),
            site_positions,
            parking: SpatialIndex::new(dataset.parking_lots),
            districts: dataset.districts,
        }
    }

    /// Loads a dataset file and indexes it.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Dataset::load(path).await?))
    }
}

fn check_radius(max_distance_m: f64) -> Result<()> {
    if max_distance_m > 0.0 {
        Ok(())
    } else {
        Err(StoreError::InvalidRadius(max_distance_m))
    }
}

fn owned<T: Clone>(ranked: Vec<Ranked<&T>>) -> Vec<Ranked<T>> {
    ranked
        .into_iter()
        .map(|r| Ranked {
            item: r.item.clone(),
            distance_m: r.distance_m,
        })
        .collect()
}

#[async_trait]
impl SpatialStore for MemoryStore {
    async fn find_sites_near(
        &self,
        center: Coordinate,
        max_distance_m: f64,
        filter: &SiteFilter,
    ) -> Result<Vec<Ranked<CulturalSite>>> {
        check_radius(max_distance_m)?;
        Ok(owned(self.sites.near(center, max_distance_m, |s| filter.matches(s))))
    }

    async fn find_sites_within_area(
        &self,
        area: &Area,
        filter: &SiteFilter,
    ) -> Result<Vec<CulturalSite>> {
        Ok(self
            .sites
            .within_area(area, |s| filter.matches(s))
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find_sites_within_box(
        &self,
        bbox: &BoundingBox,
        filter: &SiteFilter,
    ) -> Result<Vec<CulturalSite>> {
        Ok(self
            .sites
            .within_box(bbox, |s| filter.matches(s))
            .into_iter()
            .cloned()
            .collect())
    }

    async fn find_sites_by_ids(&self, ids: &[String]) -> Result<Vec<CulturalSite>> {
        let records = self.sites.records();
        Ok(ids
            .iter()
            .filter_map(|id| self.site_positions.get(id))
            .map(|&i| &records[i])
            .filter(|site| site.is_active)
            .cloned()
            .collect())
    }

    async fn find_parking_near(
        &self,
        center: Coordinate,
        max_distance_m: f64,
        filter: &ParkingFilter,
    ) -> Result<Vec<Ranked<ParkingLot>>> {
        check_radius(max_distance_m)?;
        Ok(owned(self.parking.near(center, max_distance_m, |p| filter.matches(p))))
    }

    async fn find_parking(
        &self,
        area: Option<&Area>,
        filter: &ParkingFilter,
        limit: usize,
    ) -> Result<Vec<ParkingLot>> {
        let lots = match area {
            Some(area) => self.parking.within_area(area, |p| filter.matches(p)),
            None => self
                .parking
                .records()
                .iter()
                .filter(|p| filter.matches(p))
                .collect(),
        };
        Ok(lots.into_iter().take(limit).cloned().collect())
    }

    async fn find_district(&self, name: &str) -> Result<Option<District>> {
        Ok(self.districts.iter().find(|d| d.name == name).cloned())
    }

    async fn districts(&self) -> Result<Vec<District>> {
        Ok(self.districts.clone())
    }

    async fn counts(&self) -> Result<StoreCounts> {
        Ok(StoreCounts {
            sites: self.sites.len(),
            parking_lots: self.parking.len(),
            districts: self.districts.len(),
        })
    }
}
