//! API error type with HTTP status mapping

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use culturemap_core::{Error, ErrorCode};
use culturemap_geospatial::QueryError;
use culturemap_store::ParseEnumError;
use serde::Serialize;

/// Message returned in place of server-side failure details.
pub const GENERIC_SERVER_ERROR: &str = "The service is temporarily unavailable. Please try again later.";

/// Error returned by handlers; renders as a JSON body with the code's status.
#[derive(Debug)]
pub struct ApiError(pub Error);

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
    pub category: &'static str,
}

impl ApiError {
    /// Malformed or missing request parameter
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self(Error::validation(ErrorCode::InvalidParameter, message))
    }

    /// Error code for programmatic handling
    pub fn code(&self) -> ErrorCode {
        self.0.code
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self(err.into())
    }
}

impl From<ParseEnumError> for ApiError {
    fn from(err: ParseEnumError) -> Self {
        Self::invalid_parameter(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_parameter(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_parameter(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = self.status_code();
        culturemap_telemetry::metrics().increment(&format!("http.errors.{}", code));

        let detail = if code.is_client_error() {
            tracing::debug!(code = %code, error = %self.0.message, "Request rejected");
            self.0.message.clone()
        } else {
            let report = self.0.to_report();
            tracing::error!(
                code = %report.code_str,
                message = %report.message,
                source = report.source.as_deref().unwrap_or("-"),
                "Request failed"
            );
            GENERIC_SERVER_ERROR.to_string()
        };

        let body = ErrorBody {
            detail,
            code: code.to_string(),
            category: code.category(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type Result<T> = std::result::Result<T, ApiError>;
