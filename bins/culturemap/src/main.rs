//! culturemap - geospatial API for cultural sites in Chemnitz
//!
//! Loads the configured dataset into memory and serves the HTTP API until
//! interrupted.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use culturemap_core::config::{self, Config, LogFormat};
use culturemap_server::{serve, AppState};
use culturemap_store::{MemoryStore, SpatialStore};
use culturemap_telemetry::TelemetryConfig;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "culturemap")]
#[command(about = "Geospatial API for cultural sites in Chemnitz")]
#[command(version)]
struct Cli {
    /// Path to culturemap.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// TCP port
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON dataset to serve
    #[arg(short, long)]
    dataset: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    config::validate(&config.schema).context("Invalid configuration")?;

    culturemap_telemetry::init_with_config(TelemetryConfig::from(&config.schema.logging))?;
    if let Some(path) = &config.path {
        tracing::info!(path = %path, "Configuration loaded");
    }

    let store = match &config.schema.data.dataset_path {
        Some(path) => MemoryStore::load(path)
            .await
            .with_context(|| format!("Failed to load dataset {}", path))?,
        None => {
            tracing::warn!("No dataset configured; serving an empty store");
            MemoryStore::default()
        }
    };
    record_counts(&store).await?;

    let schema = config.schema;
    let state = Arc::new(AppState::new(schema.server, schema.search, Arc::new(store)));
    serve(state, shutdown_signal()).await?;

    tracing::info!("Shut down");
    Ok(())
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    let schema = &mut config.schema;
    if let Some(host) = &cli.host {
        schema.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        schema.server.port = port;
    }
    if let Some(dataset) = &cli.dataset {
        schema.data.dataset_path = Some(dataset.clone());
    }
    if cli.verbose {
        schema.logging.level = "debug".to_string();
    }
    if let Some(format) = cli.log_format {
        schema.logging.format = format.into();
    }
}

async fn record_counts(store: &MemoryStore) -> Result<()> {
    let counts = store.counts().await?;
    let metrics = culturemap_telemetry::metrics();
    metrics.gauge("store.sites", counts.sites as u64);
    metrics.gauge("store.parking_lots", counts.parking_lots as u64);
    metrics.gauge("store.districts", counts.districts as u64);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
