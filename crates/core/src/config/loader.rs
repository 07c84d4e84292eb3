//! Configuration file loading

use super::schema::{ConfigSchema, MAX_SEARCH_RADIUS_M};
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Environment variable overriding `server.host`
pub const ENV_HOST: &str = "CULTUREMAP_HOST";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "CULTUREMAP_PORT";
/// Environment variable overriding `data.dataset_path`
pub const ENV_DATASET: &str = "CULTUREMAP_DATASET";
/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "CULTUREMAP_LOG_LEVEL";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Effective settings
    pub schema: ConfigSchema,
    /// File the settings were read from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults, then apply
    /// environment overrides and validate.
    ///
    /// An explicit `path` must exist; without one the standard locations are
    /// searched and defaults apply when none exists.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema, |key| std::env::var(key).ok())?;
        validate(&schema)?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        "culturemap.toml",
        ".culturemap.toml",
        "config/culturemap.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e))?;

    toml::from_str::<ConfigSchema>(&content)
        .map_err(Error::from)
        .context(format!("While parsing {}", path))
}

/// Apply `CULTUREMAP_*` overrides read through `lookup`
pub fn apply_env_overrides(
    schema: &mut ConfigSchema,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(host) = lookup(ENV_HOST) {
        schema.server.host = host;
    }
    if let Some(port) = lookup(ENV_PORT) {
        schema.server.port = port
            .parse()
            .map_err(|_| Error::config_invalid(format!("{} must be a port number, got '{}'", ENV_PORT, port)))?;
    }
    if let Some(dataset) = lookup(ENV_DATASET) {
        schema.data.dataset_path = Some(dataset);
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        schema.logging.level = level;
    }
    Ok(())
}

/// Check value ranges that serde cannot express
pub fn validate(schema: &ConfigSchema) -> Result<()> {
    let search = &schema.search;

    if schema.server.port == 0 {
        return Err(Error::config_invalid("server.port must be non-zero"));
    }
    if !(search.max_radius_m > 0.0 && search.max_radius_m <= MAX_SEARCH_RADIUS_M) {
        return Err(Error::config_invalid(format!(
            "search.max_radius_m must be in (0, {}], got {}",
            MAX_SEARCH_RADIUS_M, search.max_radius_m
        )));
    }
    for (name, radius) in [
        ("search.default_radius_m", search.default_radius_m),
        ("search.parking_radius_m", search.parking_radius_m),
    ] {
        if !(radius > 0.0 && radius <= search.max_radius_m) {
            return Err(Error::config_invalid(format!(
                "{} must be in (0, {}], got {}",
                name, search.max_radius_m, radius
            )));
        }
    }
    for (name, limit) in [
        ("search.default_max_results", search.default_max_results),
        ("search.district_limit", search.district_limit),
        ("search.parking_limit", search.parking_limit),
    ] {
        if limit == 0 {
            return Err(Error::config_invalid(format!("{} must be positive", name)));
        }
    }
    Ok(())
}
