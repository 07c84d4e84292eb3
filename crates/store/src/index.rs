//! R-tree backed point index.
//!
//! Entries are `[lng, lat]` points tagged with the record's position in the
//! backing vector. Envelope lookups narrow the candidates, exact geometry
//! (haversine distance, ring containment) decides membership.

use crate::model::Located;
use culturemap_geo::{rank_within_radius, Area, BoundingBox, Coordinate, Ranked};
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};

type Entry = GeomWithData<[f64; 2], usize>;

/// Immutable spatial index over located records.
#[derive(Debug)]
pub struct SpatialIndex<T> {
    records: Vec<T>,
    tree: RTree<Entry>,
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            tree: RTree::new(),
        }
    }
}

impl<T: Located> SpatialIndex<T> {
    /// Bulk-loads the index.
    pub fn new(records: Vec<T>) -> Self {
        let entries = records
            .iter()
            .enumerate()
            .map(|(i, r)| Entry::new(r.coordinate().to_lng_lat(), i))
            .collect();
        Self {
            records,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Records within `radius_m` of `center`, nearest first.
    ///
    /// Equal distances keep load order.
    pub fn near(
        &self,
        center: Coordinate,
        radius_m: f64,
        predicate: impl Fn(&T) -> bool,
    ) -> Vec<Ranked<&T>> {
        let envelope = BoundingBox::around(center, radius_m);
        let candidates: Vec<(usize, Coordinate)> = self
            .in_envelope(&envelope, &predicate)
            .into_iter()
            .map(|i| (i, self.records[i].coordinate()))
            .collect();

        rank_within_radius(&center, candidates, radius_m)
            .into_iter()
            .map(|ranked| Ranked {
                item: &self.records[ranked.item],
                distance_m: ranked.distance_m,
            })
            .collect()
    }

    /// Records inside the box (edges inclusive), in load order.
    pub fn within_box(&self, bbox: &BoundingBox, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.in_envelope(bbox, &predicate)
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// Records inside the area, in load order.
    pub fn within_area(&self, area: &Area, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.in_envelope(area.bounds(), &predicate)
            .into_iter()
            .map(|i| &self.records[i])
            .filter(|r| area.contains(&r.coordinate()))
            .collect()
    }

    fn in_envelope(&self, bbox: &BoundingBox, predicate: &impl Fn(&T) -> bool) -> Vec<usize> {
        let (sw, ne) = bbox.corners_lng_lat();
        let envelope = AABB::from_corners(sw, ne);
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.data)
            .filter(|&i| predicate(&self.records[i]))
            .collect();
        hits.sort_unstable();
        hits
    }
}
