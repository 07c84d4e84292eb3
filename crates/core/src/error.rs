//! Coded error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Error codes for programmatic handling
//! - Client/server classification and HTTP status mapping
//! - Detailed error context and recovery suggestions
//! - Serializable error reports for logs and API responses

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Internal = 1000,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,

    // Validation errors (4xxx)
    ValidationError = 4000,
    InvalidCoordinate = 4001,
    InvalidRadius = 4002,
    InvalidBoundingBox = 4003,
    InvalidZoom = 4004,
    InvalidParameter = 4005,

    // Lookup errors (5xxx)
    DistrictNotFound = 5001,

    // Data store errors (6xxx)
    StoreUnavailable = 6001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            3 => "Configuration",
            4 => "Validation",
            5 => "Lookup",
            6 => "Data store",
            _ => "Unknown",
        }
    }

    /// True for failures caused by the caller's request
    pub fn is_client_error(&self) -> bool {
        matches!(self.code() / 1000, 4 | 5)
    }

    /// HTTP status code this error is reported with
    pub fn http_status(&self) -> u16 {
        match self.code() / 1000 {
            4 => 400,
            5 => 404,
            6 if *self == ErrorCode::StoreUnavailable => 503,
            _ => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    /// Generic configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Configuration file given explicitly but missing
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a culturemap.toml file or use --config to specify a path")
    }

    /// Configuration values that fail validation
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Request validation failure
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    /// District lookup by name failed
    pub fn district_not_found(name: &str) -> Self {
        Self::new(
            ErrorCode::DistrictNotFound,
            format!("District '{}' not found", name),
        )
        .with_suggestion("List valid names with GET /districts/names")
    }
}

/// Serializable error report for logging and API responses
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a recovery suggestion to the error, if any
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ConfigNotFound.to_string(), "E3001");
        assert_eq!(ErrorCode::InvalidRadius.to_string(), "E4002");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::InvalidZoom.category(), "Validation");
        assert_eq!(ErrorCode::DistrictNotFound.category(), "Lookup");
        assert_eq!(ErrorCode::StoreUnavailable.category(), "Data store");
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::InvalidCoordinate.http_status(), 400);
        assert_eq!(ErrorCode::InvalidBoundingBox.http_status(), 400);
        assert_eq!(ErrorCode::DistrictNotFound.http_status(), 404);
        assert_eq!(ErrorCode::StoreUnavailable.http_status(), 503);
        assert_eq!(ErrorCode::Internal.http_status(), 500);
        assert!(ErrorCode::InvalidZoom.is_client_error());
        assert!(!ErrorCode::StoreUnavailable.is_client_error());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config_not_found("/etc/culturemap.toml")
            .with_context("While starting the server");

        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
        assert!(err.to_string().contains("Context: While starting the server"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: Error = toml::from_str::<toml::Value>("port = ").unwrap_err().into();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::district_not_found("Atlantis").with_context("within-district query");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E5001"));
        assert!(json.contains("DISTRICT_NOT_FOUND"));
        assert!(json.contains("Atlantis"));
    }
}
