//! Straight-line route estimation through optional waypoints.
//!
//! This is a lower bound: segments are great-circle legs, no road network
//! is consulted.

use crate::error::Result;
use crate::proximity::{CYCLING_SPEED_KMH, DRIVING_SPEED_KMH, WALKING_SPEED_KMH};
use crate::service::{round_to, travel_minutes, GeoService};
use culturemap_geo::{haversine_distance, Coordinate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Attached to every route response.
pub const ROUTE_NOTE: &str =
    "Simplified straight-line route. Distances ignore the road network; use a routing service for turn-by-turn directions.";

/// Route request. Waypoints are site ids visited in the given order.
#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub waypoints: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePointKind {
    Start,
    Waypoint,
    End,
}

/// One stop on the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: RoutePointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    /// Kilometers from the previous stop; absent on the start point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_previous: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimatedTimes {
    pub walking_minutes: u32,
    pub cycling_minutes: u32,
    pub driving_minutes: u32,
}

impl EstimatedTimes {
    fn for_distance(distance_km: f64) -> Self {
        Self {
            walking_minutes: travel_minutes(distance_km, WALKING_SPEED_KMH),
            cycling_minutes: travel_minutes(distance_km, CYCLING_SPEED_KMH),
            driving_minutes: travel_minutes(distance_km, DRIVING_SPEED_KMH),
        }
    }
}

/// Route response.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub route: Vec<RoutePoint>,
    pub total_distance_km: f64,
    pub direct_distance_km: f64,
    pub estimated_times: EstimatedTimes,
    /// Number of waypoint ids requested, resolved or not
    pub waypoints_count: usize,
    pub note: &'static str,
}

impl GeoService {
    /// Accumulates great-circle legs start → waypoints → end.
    ///
    /// Waypoint ids that do not resolve to an active site are skipped and
    /// logged, never reported as an error.
    pub async fn route(&self, query: &RouteQuery) -> Result<RouteResponse> {
        let start = Coordinate::new(query.start_lat, query.start_lng).validate()?;
        let end = Coordinate::new(query.end_lat, query.end_lng).validate()?;

        let sites = if query.waypoints.is_empty() {
            Vec::new()
        } else {
            self.store.find_sites_by_ids(&query.waypoints).await?
        };

        if sites.len() < query.waypoints.len() {
            let resolved: HashSet<&str> = sites.iter().map(|s| s.id.as_str()).collect();
            let skipped: Vec<&str> = query
                .waypoints
                .iter()
                .map(String::as_str)
                .filter(|id| !resolved.contains(id))
                .collect();
            warn!(?skipped, "Skipping unresolvable route waypoints");
        }

        let mut route = Vec::with_capacity(sites.len() + 2);
        route.push(RoutePoint {
            lat: start.latitude,
            lng: start.longitude,
            kind: RoutePointKind::Start,
            site_id: None,
            site_name: None,
            distance_from_previous: None,
        });

        let mut total_km = 0.0;
        let mut previous = start;
        for site in sites {
            let here = site.location.coordinate();
            let leg = haversine_distance(&previous, &here);
            total_km += leg;
            route.push(RoutePoint {
                lat: here.latitude,
                lng: here.longitude,
                kind: RoutePointKind::Waypoint,
                site_id: Some(site.id),
                site_name: Some(site.name),
                distance_from_previous: Some(round_to(leg, 3)),
            });
            previous = here;
        }

        let last_leg = haversine_distance(&previous, &end);
        total_km += last_leg;
        route.push(RoutePoint {
            lat: end.latitude,
            lng: end.longitude,
            kind: RoutePointKind::End,
            site_id: None,
            site_name: None,
            distance_from_previous: Some(round_to(last_leg, 3)),
        });

        Ok(RouteResponse {
            route,
            total_distance_km: round_to(total_km, 3),
            direct_distance_km: round_to(haversine_distance(&start, &end), 3),
            estimated_times: EstimatedTimes::for_distance(total_km),
            waypoints_count: query.waypoints.len(),
            note: ROUTE_NOTE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::fixtures::{self, CENTER};

    fn query(waypoints: &[&str]) -> RouteQuery {
        RouteQuery {
            start_lat: CENTER.latitude,
            start_lng: CENTER.longitude,
            end_lat: 50.8379,
            end_lng: 12.9229,
            waypoints: waypoints.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_no_waypoints_equals_direct() {
        let response = fixtures::service().route(&query(&[])).await.unwrap();

        assert_eq!(response.total_distance_km, response.direct_distance_km);
        assert_eq!(response.route.len(), 2);
        assert_eq!(response.route[0].kind, RoutePointKind::Start);
        assert_eq!(response.route[1].kind, RoutePointKind::End);
        assert_eq!(response.waypoints_count, 0);
        assert_eq!(response.note, ROUTE_NOTE);
    }

    #[tokio::test]
    async fn test_waypoints_in_input_order() {
        let response = fixtures::service()
            .route(&query(&["ratskeller", "gunzenhauser"]))
            .await
            .unwrap();

        let stops: Vec<_> = response.route.iter().filter_map(|p| p.site_id.as_deref()).collect();
        assert_eq!(stops, vec!["ratskeller", "gunzenhauser"]);
        assert!(response.total_distance_km > response.direct_distance_km);

        let legs: f64 = response
            .route
            .iter()
            .filter_map(|p| p.distance_from_previous)
            .sum();
        assert!((legs - response.total_distance_km).abs() < 0.005);
    }

    #[tokio::test]
    async fn test_unresolvable_waypoints_are_skipped() {
        let response = fixtures::service()
            .route(&query(&["missing", "closed", "smac"]))
            .await
            .unwrap();

        let stops: Vec<_> = response.route.iter().filter_map(|p| p.site_id.as_deref()).collect();
        assert_eq!(stops, vec!["smac"]);
        assert_eq!(response.waypoints_count, 3);
    }

    #[tokio::test]
    async fn test_time_estimates() {
        let response = fixtures::service().route(&query(&[])).await.unwrap();
        let km = haversine_distance(&CENTER, &Coordinate::new(50.8379, 12.9229));
        let times = response.estimated_times;

        assert_eq!(times.walking_minutes, (km / 5.0 * 60.0).round() as u32);
        assert_eq!(times.cycling_minutes, (km / 15.0 * 60.0).round() as u32);
        assert_eq!(times.driving_minutes, (km / 30.0 * 60.0).round() as u32);
        assert!(times.walking_minutes >= times.cycling_minutes);
        assert!(times.cycling_minutes >= times.driving_minutes);
    }

    #[tokio::test]
    async fn test_invalid_endpoint() {
        let err = fixtures::service()
            .route(&RouteQuery {
                end_lng: 181.0,
                ..query(&[])
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidCoordinate(_)));
    }
}
