//! Proximity search: sites around a point with travel time estimates.

use crate::error::{QueryError, Result};
use crate::service::{round_to, travel_minutes, LatLng, GeoService};
use culturemap_geo::Coordinate;
use culturemap_store::{Category, CulturalSite, SiteFilter};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Walking speed in km/h.
pub const WALKING_SPEED_KMH: f64 = 5.0;
/// Cycling speed in km/h.
pub const CYCLING_SPEED_KMH: f64 = 15.0;
/// Urban driving speed in km/h.
pub const DRIVING_SPEED_KMH: f64 = 30.0;

/// Result ordering for proximity search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProximitySort {
    /// Nearest first
    #[default]
    Distance,
    /// Lexicographic by name
    Name,
    /// Most favorites, then most views, then nearest
    Popularity,
}

impl FromStr for ProximitySort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "distance" => Ok(Self::Distance),
            "name" => Ok(Self::Name),
            "popularity" => Ok(Self::Popularity),
            other => Err(QueryError::InvalidParameter(format!(
                "sort_by '{}' (expected distance, name or popularity)",
                other
            ))),
        }
    }
}

/// Proximity search request.
#[derive(Debug, Clone, Default)]
pub struct ProximityQuery {
    pub lat: f64,
    pub lng: f64,
    /// Meters; the configured default applies when absent
    pub radius_m: Option<f64>,
    pub category: Option<Category>,
    /// Result cap; the configured default applies when absent
    pub max_results: Option<usize>,
    pub include_inactive: bool,
    pub sort_by: ProximitySort,
}

/// A site with its distance and travel estimates.
#[derive(Debug, Clone, Serialize)]
pub struct ProximitySite {
    pub site: CulturalSite,
    pub distance_meters: f64,
    pub distance_km: f64,
    pub walking_time_minutes: u32,
    pub driving_time_minutes: u32,
}

impl ProximitySite {
    fn new(site: CulturalSite, distance_m: f64) -> Self {
        let distance_km = distance_m / 1000.0;
        Self {
            site,
            distance_meters: round_to(distance_m, 2),
            distance_km: round_to(distance_km, 3),
            walking_time_minutes: travel_minutes(distance_km, WALKING_SPEED_KMH),
            driving_time_minutes: travel_minutes(distance_km, DRIVING_SPEED_KMH).max(1),
        }
    }
}

/// Aggregates over the returned sites. All zero for an empty result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProximityStatistics {
    pub avg_distance_meters: f64,
    pub min_distance_meters: f64,
    pub max_distance_meters: f64,
    pub categories_found: Vec<Category>,
    pub category_counts: BTreeMap<Category, usize>,
}

impl ProximityStatistics {
    fn from_sites(sites: &[ProximitySite]) -> Self {
        if sites.is_empty() {
            return Self::default();
        }

        let distances = sites.iter().map(|s| s.distance_meters);
        let sum: f64 = distances.clone().sum();
        let min = distances.clone().fold(f64::INFINITY, f64::min);
        let max = distances.fold(f64::NEG_INFINITY, f64::max);

        let mut category_counts = BTreeMap::new();
        for s in sites {
            *category_counts.entry(s.site.category).or_insert(0) += 1;
        }

        Self {
            avg_distance_meters: round_to(sum / sites.len() as f64, 2),
            min_distance_meters: min,
            max_distance_meters: max,
            categories_found: category_counts.keys().copied().collect(),
            category_counts,
        }
    }
}

/// Proximity search response.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityResponse {
    pub sites: Vec<ProximitySite>,
    pub search_center: LatLng,
    pub search_radius_meters: f64,
    pub total_found: usize,
    pub statistics: ProximityStatistics,
}

impl GeoService {
    /// Sites within the radius of a point, with distances, travel times and
    /// summary statistics.
    ///
    /// Fails with [`QueryError::InvalidCoordinate`] or
    /// [`QueryError::InvalidRadius`] before touching the store. An empty
    /// result is not an error.
    pub async fn proximity(&self, query: &ProximityQuery) -> Result<ProximityResponse> {
        let center = Coordinate::new(query.lat, query.lng).validate()?;
        let radius = self.resolve_radius(query.radius_m, self.search.default_radius_m)?;
        let max_results = query.max_results.unwrap_or(self.search.default_max_results);

        let filter = SiteFilter {
            category: query.category,
            include_inactive: query.include_inactive,
        };

        let found = self.store.find_sites_near(center, radius, &filter).await?;
        let mut sites: Vec<ProximitySite> = found
            .into_iter()
            .filter(|r| r.distance_m <= radius && filter.matches(&r.item))
            .map(|r| ProximitySite::new(r.item, r.distance_m))
            .collect();

        sort_sites(&mut sites, query.sort_by);
        sites.truncate(max_results);

        debug!(
            lat = center.latitude,
            lng = center.longitude,
            radius,
            found = sites.len(),
            "Proximity search"
        );

        let statistics = ProximityStatistics::from_sites(&sites);
        Ok(ProximityResponse {
            total_found: sites.len(),
            search_center: center.into(),
            search_radius_meters: radius,
            statistics,
            sites,
        })
    }
}

/// Sites arrive nearest first; sorts are stable so ties keep that order.
fn sort_sites(sites: &mut [ProximitySite], sort_by: ProximitySort) {
    match sort_by {
        ProximitySort::Distance => {}
        ProximitySort::Name => sites.sort_by(|a, b| a.site.name.cmp(&b.site.name)),
        ProximitySort::Popularity => sites.sort_by(|a, b| {
            b.site
                .favorite_count
                .cmp(&a.site.favorite_count)
                .then_with(|| b.site.view_count.cmp(&a.site.view_count))
                .then_with(|| {
                    a.distance_meters
                        .partial_cmp(&b.distance_meters)
                        .unwrap_or(Ordering::Equal)
                })
        }),
    }
}
