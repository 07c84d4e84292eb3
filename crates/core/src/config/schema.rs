//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Upper bound for any search radius, in meters.
pub const MAX_SEARCH_RADIUS_M: f64 = 50_000.0;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[server]`
    #[serde(default)]
    pub server: ServerConfig,

    /// `[data]`
    #[serde(default)]
    pub data: DataConfig,

    /// `[search]`
    #[serde(default)]
    pub search: SearchConfig,

    /// `[logging]`
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
        "http://localhost:8080",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Dataset location
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// JSON dataset seeding the record store; the store starts empty when unset
    #[serde(default)]
    pub dataset_path: Option<String>,
}

/// Search defaults and limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Proximity radius when the request omits one
    #[serde(default = "default_radius_m")]
    pub default_radius_m: f64,

    /// Largest radius a request may ask for
    #[serde(default = "default_max_radius_m")]
    pub max_radius_m: f64,

    /// Proximity result cap when the request omits one
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// District membership result cap when the request omits one
    #[serde(default = "default_district_limit")]
    pub district_limit: usize,

    /// Parking search radius when the request omits one
    #[serde(default = "default_parking_radius_m")]
    pub parking_radius_m: f64,

    /// Parking list cap when the request omits one
    #[serde(default = "default_parking_limit")]
    pub parking_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_m: default_radius_m(),
            max_radius_m: default_max_radius_m(),
            default_max_results: default_max_results(),
            district_limit: default_district_limit(),
            parking_radius_m: default_parking_radius_m(),
            parking_limit: default_parking_limit(),
        }
    }
}

fn default_radius_m() -> f64 {
    1000.0
}

fn default_max_radius_m() -> f64 {
    MAX_SEARCH_RADIUS_M
}

fn default_max_results() -> usize {
    50
}

fn default_district_limit() -> usize {
    100
}

fn default_parking_radius_m() -> f64 {
    2000.0
}

fn default_parking_limit() -> usize {
    50
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
