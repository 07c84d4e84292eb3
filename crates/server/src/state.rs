//! Shared application state

use culturemap_core::config::{SearchConfig, ServerConfig};
use culturemap_geospatial::GeoService;
use culturemap_store::SpatialStore;
use std::sync::Arc;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Listener and CORS settings
    pub config: ServerConfig,
    /// Query orchestration over the record store
    pub service: GeoService,
}

impl AppState {
    /// Builds state over a store.
    pub fn new(config: ServerConfig, search: SearchConfig, store: Arc<dyn SpatialStore>) -> Self {
        Self {
            config,
            service: GeoService::new(store, search),
        }
    }
}
