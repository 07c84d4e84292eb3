//! Store error types

use culturemap_geo::GeoError;
use thiserror::Error;

/// Failures raised by store adapters and the dataset loader.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Radius queries require a strictly positive distance
    #[error("Invalid radius: {0} meters (must be positive)")]
    InvalidRadius(f64),

    /// The backing store cannot serve reads
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Dataset file could not be read
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        /// Dataset location
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Dataset document is not valid JSON or has the wrong top-level shape
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    /// Geometry passed to a query is unusable
    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
