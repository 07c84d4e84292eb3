//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Southwest corner lies north or east of the northeast corner
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Zoom level yields a degenerate grid cell size
    #[error("Invalid zoom level {zoom}: cell size {cell_size} is not a positive finite number")]
    InvalidZoom {
        /// Requested zoom level
        zoom: i32,
        /// Cell size the zoom level produced
        cell_size: f64,
    },

    /// Geometry that cannot be used for containment tests
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
