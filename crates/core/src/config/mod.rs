//! Configuration loading and schema definitions
//!
//! Settings come from a TOML file, then `CULTUREMAP_*` environment
//! variables, then command-line flags applied by the binary.

mod loader;
mod schema;

pub use loader::{apply_env_overrides, validate, Config, ENV_DATASET, ENV_HOST, ENV_LOG_LEVEL, ENV_PORT};
pub use schema::*;
