//! Buildcost estimator
//!
//! Reads an estimate document, prices it and prints the snapshot as JSON.
//!
//! ```text
//! estimate <document.json>
//! ```

mod document;

use std::path::PathBuf;

use anyhow::{Context, bail};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use buildcost_shared::{AppConfig, AppError};
use buildcost_shared::config::LoggingConfig;

use crate::document::EstimateDocument;

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the snapshot
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_with_dotenv()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: estimate <document.json>");
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: EstimateDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid estimate document {}", path.display()))?;
    info!(path = %path.display(), "Loaded estimate document");

    let snapshot = document::run(document, &config)
        .map_err(|e| anyhow::anyhow!("{}: {e}", e.error_code()))?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
