//! Core utilities for the culturemap API
//!
//! This crate provides shared functionality used across the workspace:
//!
//! - **Error handling**: Coded errors with context, recovery suggestions and
//!   HTTP status mapping
//! - **Configuration**: TOML-based configuration with environment overrides
//!   and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use culturemap_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("listening on {}", config.schema.server.bind_address());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt};
