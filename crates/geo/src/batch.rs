//! Batch distance ranking with optional parallelism.
//!
//! Store adapters hand over the candidates surviving their index prefilter;
//! this module computes exact haversine distances, drops everything beyond
//! the radius and orders the rest nearest first.

use crate::{haversine_distance_meters, Coordinate};
use std::cmp::Ordering;

/// An item paired with its distance from the query center.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    /// The ranked item
    pub item: T,
    /// Great-circle distance from the center in meters
    pub distance_m: f64,
}

/// Rank items by distance from `center`, keeping those within `radius_m`.
///
/// Ties keep their input order, so results are deterministic for a given
/// candidate order.
///
/// # Example
/// ```
/// use culturemap_geo::{rank_within_radius, Coordinate};
///
/// let center = Coordinate::new(50.8279, 12.9214);
/// let items = vec![
///     ("far", Coordinate::new(50.8500, 12.9600)),
///     ("near", Coordinate::new(50.8290, 12.9220)),
/// ];
///
/// let ranked = rank_within_radius(&center, items, 1000.0);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].item, "near");
/// ```
pub fn rank_within_radius<T: Send>(
    center: &Coordinate,
    items: Vec<(T, Coordinate)>,
    radius_m: f64,
) -> Vec<Ranked<T>> {
    let mut ranked: Vec<Ranked<T>> = measure(center, items)
        .into_iter()
        .filter(|r| r.distance_m <= radius_m)
        .collect();

    ranked.sort_by(|a, b| a.distance_m.partial_cmp(&b.distance_m).unwrap_or(Ordering::Equal));
    ranked
}

/// Candidate count from which distances are computed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 1024;

fn measure<T: Send>(center: &Coordinate, items: Vec<(T, Coordinate)>) -> Vec<Ranked<T>> {
    #[cfg(feature = "parallel")]
    {
        if items.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;
            return items
                .into_par_iter()
                .map(|(item, coord)| rank(center, item, &coord))
                .collect();
        }
    }

    items
        .into_iter()
        .map(|(item, coord)| rank(center, item, &coord))
        .collect()
}

#[inline]
fn rank<T>(center: &Coordinate, item: T, coord: &Coordinate) -> Ranked<T> {
    Ranked {
        item,
        distance_m: haversine_distance_meters(center, coord),
    }
}
