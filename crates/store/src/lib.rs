//! Record model and spatial store adapter for the culturemap API.
//!
//! [`SpatialStore`] is the read-only contract the query layer depends on:
//! nearest-first radius queries, polygon containment and bounding-box
//! lookups, each with a filter applied before geometry work.
//! [`MemoryStore`] implements it over R-tree indexes seeded from a JSON
//! [`Dataset`].
//!
//! # Example
//!
//! ```rust,no_run
//! use culturemap_geo::Coordinate;
//! use culturemap_store::{MemoryStore, SiteFilter, SpatialStore};
//!
//! # async fn run() -> culturemap_store::Result<()> {
//! let store = MemoryStore::load("data/chemnitz.json").await?;
//! let near = store
//!     .find_sites_near(Coordinate::new(50.8279, 12.9214), 1000.0, &SiteFilter::default())
//!     .await?;
//! println!("{} sites within 1 km", near.len());
//! # Ok(())
//! # }
//! ```

mod dataset;
mod error;
mod index;
mod memory;
mod model;
mod store;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use dataset::Dataset;
pub use error::{Result, StoreError};
pub use index::SpatialIndex;
pub use memory::MemoryStore;
pub use model::{
    Category, CulturalSite, District, Located, ParkingFilter, ParkingLot, ParkingType,
    ParseEnumError, Properties, SiteFilter, StoreCounts,
};
pub use store::SpatialStore;
