//! Query error taxonomy

use culturemap_core::{Error, ErrorCode};
use culturemap_geo::GeoError;
use culturemap_store::StoreError;
use thiserror::Error;

/// Failures of a geospatial query.
///
/// Everything except [`QueryError::StoreUnavailable`] is caused by the
/// request itself.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Search radius not positive or above the configured maximum
    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    /// Southwest corner north or east of the northeast corner
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Zoom level yields an unusable grid cell size
    #[error("Invalid zoom level: {0}")]
    InvalidZoom(String),

    /// Malformed enumerated or numeric parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No district with the requested name
    #[error("District '{0}' not found")]
    DistrictNotFound(String),

    /// The record store failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl QueryError {
    /// Error code for programmatic handling
    pub fn code(&self) -> ErrorCode {
        match self {
            QueryError::InvalidCoordinate(_) => ErrorCode::InvalidCoordinate,
            QueryError::InvalidRadius(_) => ErrorCode::InvalidRadius,
            QueryError::InvalidBoundingBox(_) => ErrorCode::InvalidBoundingBox,
            QueryError::InvalidZoom(_) => ErrorCode::InvalidZoom,
            QueryError::InvalidParameter(_) => ErrorCode::InvalidParameter,
            QueryError::DistrictNotFound(_) => ErrorCode::DistrictNotFound,
            QueryError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        }
    }

    /// True for failures caused by the request
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }
}

impl From<GeoError> for QueryError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::InvalidCoordinate(msg) => QueryError::InvalidCoordinate(msg),
            GeoError::InvalidBoundingBox(msg) => QueryError::InvalidBoundingBox(msg),
            GeoError::InvalidZoom { zoom, cell_size } => QueryError::InvalidZoom(format!(
                "zoom {} gives cell size {} degrees",
                zoom, cell_size
            )),
            other => QueryError::InvalidParameter(other.to_string()),
        }
    }
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidRadius(radius) => {
                QueryError::InvalidRadius(format!("{} meters (must be positive)", radius))
            }
            StoreError::Geo(geo) => geo.into(),
            other => QueryError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::DistrictNotFound(name) => Error::district_not_found(&name),
            zoom @ QueryError::InvalidZoom(_) => Error::new(ErrorCode::InvalidZoom, zoom.to_string())
                .with_suggestion("Use a zoom level between 0 and 22"),
            other => Error::new(other.code(), other.to_string()),
        }
    }
}

/// Result type for queries
pub type Result<T> = std::result::Result<T, QueryError>;
