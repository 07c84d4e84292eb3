//! Geospatial queries for the culturemap API.
//!
//! [`GeoService`] orchestrates every location-based query over a
//! [`SpatialStore`](culturemap_store::SpatialStore):
//!
//! - **Proximity search**: sites around a point with travel times and
//!   distance statistics
//! - **Tile clustering**: viewport sites bucketed into zoom-dependent grid
//!   cells
//! - **District membership**: sites inside a named district boundary
//! - **Route estimation**: straight-line distance through ordered waypoints
//! - **Parking search**: lots near a point or inside a district
//!
//! Validation happens before any store access. Aggregation is computed
//! fresh per request; the service holds no mutable state.
//!
//! # Example
//!
//! ```rust,no_run
//! use culturemap_core::config::SearchConfig;
//! use culturemap_geospatial::{GeoService, ProximityQuery};
//! use culturemap_store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::load("data/chemnitz.json").await?;
//! let service = GeoService::new(Arc::new(store), SearchConfig::default());
//!
//! let nearby = service
//!     .proximity(&ProximityQuery { lat: 50.8279, lng: 12.9214, ..Default::default() })
//!     .await?;
//! println!("{} sites, avg {} m", nearby.total_found, nearby.statistics.avg_distance_meters);
//! # Ok(())
//! # }
//! ```

mod clustering;
mod district;
mod error;
mod parking;
mod proximity;
mod route;
mod service;

#[cfg(test)]
mod fixtures;

pub use clustering::{Cluster, ClusterQuery, ClusterResponse, ViewportBox, DEFAULT_ZOOM};
pub use district::{
    DistrictFilters, DistrictName, DistrictNamesResponse, DistrictQuery, DistrictRef,
    DistrictSitesResponse, DistrictSort, DistrictStatistics,
};
pub use error::{QueryError, Result};
pub use parking::{
    ParkingListFilters, ParkingListQuery, ParkingListResponse, ParkingNearQuery,
    ParkingNearResponse, ParkingWithDistance,
};
pub use proximity::{
    ProximityQuery, ProximityResponse, ProximitySite, ProximitySort, ProximityStatistics,
    CYCLING_SPEED_KMH, DRIVING_SPEED_KMH, WALKING_SPEED_KMH,
};
pub use route::{EstimatedTimes, RoutePoint, RoutePointKind, RouteQuery, RouteResponse, ROUTE_NOTE};
pub use service::{GeoService, LatLng};
