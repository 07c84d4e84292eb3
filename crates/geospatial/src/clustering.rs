//! Grid clustering of sites inside a map viewport.

use crate::error::Result;
use crate::service::GeoService;
use culturemap_geo::{cell_size_for_zoom, grid_cell, BoundingBox, Coordinate, GridCell};
use culturemap_store::{Category, Located, SiteFilter};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Zoom level used when the request omits one.
pub const DEFAULT_ZOOM: i32 = 10;

/// Viewport clustering request.
#[derive(Debug, Clone)]
pub struct ClusterQuery {
    pub ne_lat: f64,
    pub ne_lng: f64,
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub zoom_level: i32,
    pub category: Option<Category>,
}

/// Sites sharing one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub cell: GridCell,
    /// Mean member latitude
    pub center_lat: f64,
    /// Mean member longitude
    pub center_lng: f64,
    pub sites_count: usize,
    pub categories: Vec<Category>,
    /// Member site ids
    pub sites: Vec<String>,
}

/// Viewport echoed back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportBox {
    pub ne_lat: f64,
    pub ne_lng: f64,
    pub sw_lat: f64,
    pub sw_lng: f64,
}

/// Clustering response.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterResponse {
    pub clusters: Vec<Cluster>,
    pub total_clusters: usize,
    pub bounding_box: ViewportBox,
    pub zoom_level: i32,
    pub cluster_size_degrees: f64,
}

#[derive(Default)]
struct Accumulator {
    lat_sum: f64,
    lng_sum: f64,
    categories: BTreeSet<Category>,
    sites: Vec<String>,
}

impl GeoService {
    /// Active sites in the viewport grouped into zoom-dependent grid cells.
    ///
    /// Every site lands in exactly one cluster. Clusters are ordered by
    /// descending size, then by cell.
    pub async fn clusters(&self, query: &ClusterQuery) -> Result<ClusterResponse> {
        let bbox = BoundingBox::new(
            Coordinate::new(query.sw_lat, query.sw_lng),
            Coordinate::new(query.ne_lat, query.ne_lng),
        )?;
        let cell_size = cell_size_for_zoom(query.zoom_level)?;

        let sites = self
            .store
            .find_sites_within_box(&bbox, &SiteFilter::active(query.category))
            .await?;

        let mut cells: BTreeMap<GridCell, Accumulator> = BTreeMap::new();
        for site in sites {
            let coord = site.coordinate();
            let acc = cells.entry(grid_cell(&coord, cell_size)).or_default();
            acc.lat_sum += coord.latitude;
            acc.lng_sum += coord.longitude;
            acc.categories.insert(site.category);
            acc.sites.push(site.id);
        }

        let mut clusters: Vec<Cluster> = cells
            .into_iter()
            .map(|(cell, acc)| {
                let n = acc.sites.len() as f64;
                Cluster {
                    cell,
                    center_lat: acc.lat_sum / n,
                    center_lng: acc.lng_sum / n,
                    sites_count: acc.sites.len(),
                    categories: acc.categories.into_iter().collect(),
                    sites: acc.sites,
                }
            })
            .collect();
        // stable: equal counts stay in cell order
        clusters.sort_by(|a, b| b.sites_count.cmp(&a.sites_count));

        debug!(
            zoom = query.zoom_level,
            cell_size,
            clusters = clusters.len(),
            "Clustered viewport"
        );

        Ok(ClusterResponse {
            total_clusters: clusters.len(),
            clusters,
            bounding_box: ViewportBox {
                ne_lat: query.ne_lat,
                ne_lng: query.ne_lng,
                sw_lat: query.sw_lat,
                sw_lng: query.sw_lng,
            },
            zoom_level: query.zoom_level,
            cluster_size_degrees: cell_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::fixtures;

    fn viewport(zoom_level: i32) -> ClusterQuery {
        ClusterQuery {
            ne_lat: 50.85,
            ne_lng: 12.95,
            sw_lat: 50.80,
            sw_lng: 12.90,
            zoom_level,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_reference_zoom_cell_size() {
        let response = fixtures::service().clusters(&viewport(10)).await.unwrap();
        assert_eq!(response.cluster_size_degrees, 0.1);
        assert_eq!(response.zoom_level, 10);
        assert_eq!(response.bounding_box.sw_lat, 50.80);
    }

    #[tokio::test]
    async fn test_every_site_in_exactly_one_cluster() {
        let service = fixtures::service();
        for zoom in [8, 10, 12, 14, 16, 18] {
            let response = service.clusters(&viewport(zoom)).await.unwrap();

            let total: usize = response.clusters.iter().map(|c| c.sites_count).sum();
            assert_eq!(total, 5, "zoom {}", zoom);

            let mut ids: Vec<&str> = response
                .clusters
                .iter()
                .flat_map(|c| c.sites.iter().map(String::as_str))
                .collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 5, "zoom {}", zoom);

            assert!(response
                .clusters
                .windows(2)
                .all(|w| w[0].sites_count >= w[1].sites_count));
        }
    }

    #[tokio::test]
    async fn test_centroid_and_categories() {
        let response = fixtures::service()
            .clusters(&ClusterQuery {
                category: Some(Category::Museum),
                ..viewport(10)
            })
            .await
            .unwrap();

        assert_eq!(response.total_clusters, 1);
        let cluster = &response.clusters[0];
        assert_eq!(cluster.sites, vec!["smac", "gunzenhauser"]);
        assert_eq!(cluster.categories, vec![Category::Museum]);
        assert!((cluster.center_lat - (50.8317 + 50.8310) / 2.0).abs() < 1e-9);
        assert!((cluster.center_lng - (12.9213 + 12.9245) / 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_single_member_cells_are_emitted() {
        let response = fixtures::service().clusters(&viewport(18)).await.unwrap();
        assert_eq!(response.total_clusters, 5);
        assert!(response.clusters.iter().all(|c| c.sites_count == 1));
    }

    #[tokio::test]
    async fn test_invalid_box_and_zoom() {
        let service = fixtures::service();

        let inverted = ClusterQuery {
            sw_lat: 50.85,
            ne_lat: 50.80,
            ..viewport(10)
        };
        assert!(matches!(
            service.clusters(&inverted).await,
            Err(QueryError::InvalidBoundingBox(_))
        ));

        assert!(matches!(
            service.clusters(&viewport(2000)).await,
            Err(QueryError::InvalidZoom(_))
        ));
    }

    #[tokio::test]
    async fn test_zoom_past_index_range_is_rejected() {
        let service = fixtures::service();

        assert!(matches!(
            service.clusters(&viewport(70)).await,
            Err(QueryError::InvalidZoom(_))
        ));

        let finest = service.clusters(&viewport(62)).await.unwrap();
        assert_eq!(finest.total_clusters, 5);
    }
}
